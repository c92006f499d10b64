// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod attachment;
mod request;
mod verdict;

pub use attachment::*;
pub use request::*;
pub use verdict::*;
