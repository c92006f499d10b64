// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use hakim::domain::Attachment;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(uri) = std::str::from_utf8(data) {
        if let Ok(attachment) = Attachment::from_data_uri(uri) {
            let bytes = attachment.decode().expect("validated payload decodes");
            assert!(!bytes.is_empty());
        }
    }
});
