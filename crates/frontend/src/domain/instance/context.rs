use contracts::instance::InstanceInfo;
use leptos::prelude::*;

/// Instance shown by the dashboard, shared with every tab
#[derive(Clone, Copy)]
pub struct InstanceContext {
    pub uuid: Signal<String>,
    /// `None` until `/info` has answered
    pub info: ReadSignal<Option<InstanceInfo>>,
}

impl InstanceContext {
    pub fn is_loaded(&self) -> bool {
        self.info.with(|i| i.is_some())
    }
}

pub fn use_instance() -> InstanceContext {
    expect_context::<InstanceContext>()
}
