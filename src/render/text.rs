// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mmdiagram-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mmdiagram and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Shortens `text` to at most `max_len` characters, marking the cut with `…`.
pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if text.chars().count() <= max_len => text.to_owned(),
        1 => "…".to_owned(),
        _ => text.chars().take(max_len - 1).chain(['…']).collect(),
    }
}

/// Pads `cell` with spaces to `width` characters.
pub(crate) fn pad_right(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    let mut out = String::with_capacity(cell.len() + width.saturating_sub(len));
    out.push_str(cell);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

#[cfg(test)]
mod tests {
    use super::{pad_right, truncate_with_ellipsis};

    #[test]
    fn truncate_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("kernel", 0), "");
        assert_eq!(truncate_with_ellipsis("kernel", 1), "…");
        assert_eq!(truncate_with_ellipsis("k", 1), "k");
        assert_eq!(truncate_with_ellipsis("kernel", 4), "ker…");
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(truncate_with_ellipsis("αβγ", 2), "α…");
        assert_eq!(pad_right("αβ", 4), "αβ  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
