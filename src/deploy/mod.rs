// The deploy view's state-synchronization core, kept free of any rendering
// so it can be driven by tests as easily as by the terminal UI.

pub mod keys;
pub mod projection;
pub mod props;
pub mod subscription;
pub mod view_model;

pub use keys::{CommitKey, DEPLOYER_APP_ID, JobKey};
pub use projection::ProjectedState;
pub use props::DeployProps;
pub use subscription::Subscription;
pub use view_model::DeployViewModel;
