//! An abstraction layer for native dialogs and shell integration to enable testing.

use anyhow::Result;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

/// Defines a common interface for the native dialogs and the file manager.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a directory to add to the search roots.
    fn pick_root_directory(&self) -> Option<PathBuf>;

    /// Opens a dialog to select the destination of a move.
    fn pick_move_destination(&self) -> Option<PathBuf>;

    /// Asks the user to confirm deleting `count` items. `true` means go ahead.
    fn confirm_delete(&self, count: usize) -> bool;

    /// Shows `dir` in the platform file manager.
    fn open_in_file_manager(&self, dir: &Path) -> Result<()>;
}

/// The production implementation backed by `rfd` and `open`.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_root_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new().set_title("Choose a folder").pick_folder()
    }

    fn pick_move_destination(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Choose the destination folder")
            .pick_folder()
    }

    fn confirm_delete(&self, count: usize) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Confirm")
            .set_description(format!(
                "Delete {count} selected item(s)? This cannot be undone."
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn open_in_file_manager(&self, dir: &Path) -> Result<()> {
        open::that(dir)?;
        Ok(())
    }
}
