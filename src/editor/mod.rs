// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editing session that drives clustering, selection and history.

pub mod session;

pub use session::Editor;
