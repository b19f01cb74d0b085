// engine module — backend engine feeding the stores

mod interface;
pub mod stub;

pub use interface::{DeployDispatch, Engine, EngineDispatcher, EngineHandle, Event, Request};
pub use stub::StubEngine;
