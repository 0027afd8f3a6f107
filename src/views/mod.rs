// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered views.

pub mod html;
pub mod mount;
pub mod navigation;
pub mod notice;
pub mod pages;

pub use mount::{Loadable, Mount, Slot, PLACEHOLDER};
pub use navigation::Menu;
pub use notice::{Notice, NoticeLevel};
