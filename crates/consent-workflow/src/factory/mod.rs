pub mod flow_factory;

pub use flow_factory::{ConsentRuntime, FlowCoordinator, FlowFactory};
