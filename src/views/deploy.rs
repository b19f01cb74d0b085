use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use iocraft::prelude::*;

use crate::app::HostNotice;
use crate::color::ColorDepth;
use crate::components::deploy_modal::{DeployModal, RenderedDeployModal};
use crate::deploy::DeployViewModel;
use crate::engine::Event;
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// DeployView component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct DeployViewProps<'a> {
    /// The deploy view's state-synchronization core, shared with `main`.
    pub view_model: Option<&'a Arc<Mutex<DeployViewModel>>>,
    /// Engine lifecycle events the host folds into the view's props.
    pub events: Option<&'a Arc<Mutex<Receiver<Event>>>>,
    /// Change/hide signals emitted by the view model's callbacks.
    pub notices: Option<&'a Arc<Mutex<Receiver<HostNotice>>>>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
    pub width: u16,
    pub height: u16,
    pub should_exit: Option<State<bool>>,
}

#[component]
pub fn DeployView<'a>(props: &DeployViewProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let theme = props.theme.cloned().unwrap_or_else(super::default_theme);
    let depth = props.color_depth;
    let should_exit = props.should_exit;

    // Bumped whenever the projection may have moved, to force a re-render.
    let mut tick = hooks.use_state(|| 0u64);
    let mut mounted = hooks.use_state(|| false);

    let view_model = props.view_model.cloned();

    // Register on the stores once, before the first event can arrive.
    if !mounted.get() {
        mounted.set(true);
        if let Some(ref vm) = view_model {
            vm.lock().unwrap().mount();
        }
    }

    // Poll engine events and view-model notices.
    {
        let vm_for_poll = view_model.clone();
        let events_rx = props.events.cloned();
        let notices_rx = props.notices.cloned();
        hooks.use_future(async move {
            let (Some(vm), Some(events), Some(notices)) = (vm_for_poll, events_rx, notices_rx)
            else {
                return;
            };
            loop {
                smol::Timer::after(std::time::Duration::from_millis(50)).await;
                let mut moved = false;

                let drained: Vec<Event> = {
                    let rx = events.lock().unwrap();
                    std::iter::from_fn(|| rx.try_recv().ok()).collect()
                };
                for event in drained {
                    let mut vm = vm.lock().unwrap();
                    let mut new_props = vm.props().clone();
                    match event {
                        Event::DeployStarted { job } => {
                            new_props.job = Some(job);
                            new_props.error_msg = None;
                        }
                        Event::DeployFailed { message } => {
                            new_props.error_msg = Some(message);
                        }
                    }
                    vm.update_props(new_props);
                    moved = true;
                }

                let drained: Vec<HostNotice> = {
                    let rx = notices.lock().unwrap();
                    std::iter::from_fn(|| rx.try_recv().ok()).collect()
                };
                for notice in drained {
                    match notice {
                        HostNotice::StoreChanged => {
                            vm.lock().unwrap().refresh();
                            moved = true;
                        }
                        HostNotice::Hide => {
                            if let Some(mut exit) = should_exit {
                                exit.set(true);
                            }
                        }
                    }
                }

                if moved {
                    tick.set(tick.get() + 1);
                }
            }
        });
    }

    // Keyboard handling.
    {
        let vm_for_keys = view_model.clone();
        hooks.use_terminal_events(move |event| {
            if let TerminalEvent::Key(KeyEvent { code, kind, .. }) = event
                && kind != KeyEventKind::Release
            {
                match code {
                    KeyCode::Enter => {
                        if let Some(ref vm) = vm_for_keys {
                            let mut vm = vm.lock().unwrap();
                            if vm.state().deployed {
                                vm.dismiss_click();
                            } else {
                                vm.deploy_click();
                            }
                        }
                        tick.set(tick.get() + 1);
                    }
                    // Modal chrome: closing the overlay bypasses the view model.
                    KeyCode::Esc | KeyCode::Char('q') => {
                        if let Some(mut exit) = should_exit {
                            exit.set(true);
                        }
                    }
                    _ => {}
                }
            }
        });
    }

    let modal = view_model.as_ref().map(|vm| {
        let vm = vm.lock().unwrap();
        RenderedDeployModal::build(
            vm.state(),
            vm.props().error_msg.as_deref(),
            &theme,
            depth,
            props.width,
        )
    });

    element! {
        View(width: u32::from(props.width), height: u32::from(props.height)) {
            DeployModal(modal, width: props.width, height: props.height)
        }
    }
    .into_any()
}
