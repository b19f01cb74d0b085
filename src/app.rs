use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::deploy::DeployViewModel;
use crate::engine::Event;
use crate::theme::ResolvedTheme;
use crate::views::deploy::DeployView;

// ---------------------------------------------------------------------------
// Host notices
// ---------------------------------------------------------------------------

/// Signals from the view model's injected callbacks back into the
/// component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNotice {
    /// A store entry the view is registered on changed.
    StoreChanged,
    /// The user dismissed the view after a finished deploy.
    Hide,
}

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub view_model: Option<&'a Arc<Mutex<DeployViewModel>>>,
    pub events: Option<&'a Arc<Mutex<Receiver<Event>>>>,
    pub notices: Option<&'a Arc<Mutex<Receiver<HostNotice>>>>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
}

#[component]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let should_exit = hooks.use_state(|| false);

    // Exit handling: deregister from the stores, then leave the TUI.
    if should_exit.get() {
        if let Some(vm) = props.view_model {
            vm.lock().unwrap().unmount();
        }
        system.exit();
    }

    element! {
        View(width: u32::from(width), height: u32::from(height), flex_direction: FlexDirection::Column) {
            DeployView(
                view_model: props.view_model,
                events: props.events,
                notices: props.notices,
                theme: props.theme,
                color_depth: props.color_depth,
                width,
                height,
                should_exit,
            )
        }
    }
}
