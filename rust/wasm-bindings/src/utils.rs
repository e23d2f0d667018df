// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use psycad_geometry::Notice;

/// Set panic hook for better error messages in the browser
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Human-readable line for a non-fatal notice
pub(crate) fn describe_notice(notice: &Notice) -> String {
    match notice {
        Notice::NotImplemented { index, feature } => {
            format!("[psycad] operation {} ({}) is not implemented; geometry unchanged", index, feature.as_str())
        }
        Notice::Skipped { index, operator } => {
            format!("[psycad] operation {} skipped: '{}' is not a boolean operator", index, operator)
        }
        Notice::InOperand { index, notice } => {
            format!("{} (in operand of operation {})", describe_notice(notice), index)
        }
    }
}

/// Forward notices to the browser console
pub(crate) fn log_notices(notices: &[Notice]) {
    #[cfg(target_arch = "wasm32")]
    for notice in notices {
        web_sys::console::warn_1(&describe_notice(notice).into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = notices;
}

#[cfg(test)]
mod tests {
    use super::*;
    use psycad_core::Feature;

    #[test]
    fn test_describe_nested_notice() {
        let notice = Notice::InOperand {
            index: 2,
            notice: Box::new(Notice::NotImplemented {
                index: 0,
                feature: Feature::Fillet,
            }),
        };
        let line = describe_notice(&notice);
        assert!(line.contains("operation 0 (fillet)"));
        assert!(line.ends_with("(in operand of operation 2)"));
    }
}
