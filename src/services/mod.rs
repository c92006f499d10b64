// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

pub mod analysis;
pub mod classifier;
pub mod encoder;
pub mod llm;
pub mod normalizer;
pub mod report;
pub mod request;

