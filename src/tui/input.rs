use arboard::Clipboard;

use crate::explorer::Explorer;

use super::state::TuiState;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    Clipboard::new()?.set_text(text.to_string())
}

/// Copy something about the hovered commit, reporting the outcome in the status line.
pub fn copy_hovered(explorer: &Explorer, state: &mut TuiState, what: CopyTarget) {
    let Some(commit) = explorer.hovered_commit() else {
        state.set_status("Hover a commit first");
        return;
    };
    let text = match what {
        CopyTarget::Id => commit.id.clone(),
        CopyTarget::Url => match &commit.url {
            Some(url) => url.clone(),
            None => {
                state.set_status("No link: pass --repo-url");
                return;
            }
        },
    };
    match copy_to_clipboard(&text) {
        Ok(()) => state.set_status(format!("Copied: {text}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Id,
    Url,
}
