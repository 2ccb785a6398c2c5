//! PulseAudio query adapter.
//!
//! The pulse client library is callback-driven: every query returns an
//! operation handle and delivers its result through a closure invoked while
//! the client mainloop runs. This module bridges that into synchronous
//! accessors by stepping the mainloop in place until each operation leaves
//! its running state. Works against PipeWire too, through pipewire-pulse.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};
use libpulse_binding::callbacks::ListResult;
use libpulse_binding::context::introspect::SinkInfo;
use libpulse_binding::context::{Context, FlagSet, State as ContextState};
use libpulse_binding::mainloop::standard::{IterateResult, Mainloop};
use libpulse_binding::operation::{Operation, State as OperationState};
use libpulse_binding::volume::Volume;
use tracing::info;

/// Written into string results when a reply carried no usable record, e.g.
/// a sink that disappeared between queries.
const QUERY_SENTINEL: &str = "error";

/// Mute flag of a sink, as far as it could be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuteState {
    Unmuted,
    Muted,
    /// The query failed or the reply carried no record.
    Invalid,
}

/// Owns the client mainloop and server context for the process lifetime.
///
/// Not `Send`: all queries run on the thread that connected.
pub struct AudioClient {
    // Declared before the mainloop so the context disconnects first on drop.
    context: Context,
    mainloop: Mainloop,
}

impl AudioClient {
    /// Connect to the PulseAudio server, stepping the mainloop until the
    /// context reaches a terminal state.
    pub fn connect() -> Result<Self> {
        let mut mainloop = Mainloop::new().ok_or_else(|| anyhow!("Failed to create PulseAudio mainloop"))?;
        let mut context = Context::new(&mainloop, "statbar")
            .ok_or_else(|| anyhow!("Failed to create PulseAudio context"))?;
        context
            .connect(None, FlagSet::NOFLAGS, None)
            .map_err(|e| anyhow!("Failed to start PulseAudio connection: {e:?}"))?;

        loop {
            match mainloop.iterate(true) {
                IterateResult::Success(_) => {}
                IterateResult::Quit(_) => bail!("PulseAudio mainloop quit while connecting"),
                IterateResult::Err(e) => bail!("PulseAudio mainloop error while connecting: {e:?}"),
            }
            match context.get_state() {
                ContextState::Ready => break,
                ContextState::Failed | ContextState::Terminated => {
                    bail!("PulseAudio connection failed")
                }
                // Unconnected, Connecting, Authorizing, SettingName
                _ => {}
            }
        }
        info!("connected to the PulseAudio server");

        Ok(Self { context, mainloop })
    }

    /// Name of the server's default sink.
    ///
    /// `None` only when the operation itself is cancelled; a reply without a
    /// default sink still yields `Some("error")`.
    pub fn default_sink_name(&mut self) -> Option<String> {
        let slot: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let filled = Rc::clone(&slot);
        let op = self.context.introspect().get_server_info(move |info| {
            let name = info
                .default_sink_name
                .as_ref()
                .map_or_else(|| QUERY_SENTINEL.to_string(), ToString::to_string);
            filled.borrow_mut().get_or_insert(name);
        });
        self.drive(op).ok()?;

        Some(slot.borrow_mut().take().unwrap_or_else(|| QUERY_SENTINEL.to_string()))
    }

    /// Name of the sink's active port, `None` on a cancelled operation.
    pub fn active_port_name(&mut self, sink: &str) -> Option<String> {
        self.sink_query(sink, QUERY_SENTINEL.to_string(), |info| {
            info.active_port
                .as_ref()
                .and_then(|port| port.name.as_ref())
                .map_or_else(|| QUERY_SENTINEL.to_string(), ToString::to_string)
        })
        .ok()
    }

    /// Sink volume as a percentage of the full scale, `0` on failure.
    pub fn volume_percent(&mut self, sink: &str) -> u32 {
        self.sink_query(sink, 0, |info| percent_of_normal(info.volume.avg()))
            .unwrap_or(0)
    }

    /// Mute flag of the sink; failures collapse into [`MuteState::Invalid`].
    pub fn mute_state(&mut self, sink: &str) -> MuteState {
        self.sink_query(sink, MuteState::Invalid, |info| {
            if info.mute { MuteState::Muted } else { MuteState::Unmuted }
        })
        .unwrap_or(MuteState::Invalid)
    }

    /// Look up `sink` and extract one field from the first record of the
    /// reply. `sentinel` stands in when the reply has no usable record.
    fn sink_query<T, F>(&mut self, sink: &str, sentinel: T, extract: F) -> Result<T>
    where
        T: Clone + 'static,
        F: Fn(&SinkInfo) -> T + 'static,
    {
        let slot: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
        let filled = Rc::clone(&slot);
        let fallback = sentinel.clone();
        let op = self
            .context
            .introspect()
            .get_sink_info_by_name(sink, move |list| match list {
                ListResult::Item(info) => {
                    // Only the first record counts; a by-name lookup
                    // delivers at most one anyway.
                    filled.borrow_mut().get_or_insert_with(|| extract(info));
                }
                ListResult::End => {}
                ListResult::Error => {
                    *filled.borrow_mut() = Some(fallback.clone());
                }
            });
        self.drive(op)?;

        let delivered = slot.borrow_mut().take();
        Ok(delivered.unwrap_or(sentinel))
    }

    /// Step the mainloop until `op` leaves [`OperationState::Running`].
    ///
    /// This is the one blocking bridge over the library's asynchronous
    /// plumbing; the callback fires from inside `iterate` before the
    /// operation reports done.
    fn drive<F>(&mut self, op: Operation<F>) -> Result<()>
    where
        F: ?Sized,
    {
        loop {
            match op.get_state() {
                OperationState::Done => return Ok(()),
                OperationState::Cancelled => bail!("PulseAudio operation cancelled"),
                OperationState::Running => match self.mainloop.iterate(true) {
                    IterateResult::Success(_) => {}
                    IterateResult::Quit(_) => bail!("PulseAudio mainloop quit mid-operation"),
                    IterateResult::Err(e) => bail!("PulseAudio mainloop error: {e:?}"),
                },
            }
        }
    }
}

impl Drop for AudioClient {
    fn drop(&mut self) {
        self.context.disconnect();
    }
}

/// Average channel volume as a percentage of the library's full scale.
fn percent_of_normal(avg: Volume) -> u32 {
    (f64::from(avg.0) / f64::from(Volume::NORMAL.0) * 100.0).round() as u32
}
