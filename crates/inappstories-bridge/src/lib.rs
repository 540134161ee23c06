// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inappstories — Host-facing bridge.
//
// The host embedding environment (a React-style application shell) talks to
// the native side through two seams: method invocations on `StoriesModule`
// and a named-event channel behind the `EventEmitter` trait. This crate
// implements the module, the view manager, and emitter implementations for
// channel-backed and headless embeddings.

pub mod emitter;
pub mod module;
pub mod view_manager;

pub use emitter::{ChannelEmitter, EmittedEvent, EventEmitter, StubEmitter};
pub use module::{ENGINE_ACTION_EVENT, StoriesModule, VIEW_STATE_EVENT};
pub use view_manager::StoryViewManager;
