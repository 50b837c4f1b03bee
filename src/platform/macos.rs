//! macOS-specific helpers.
#![allow(deprecated)] // Keep Cocoa warnings localized
#![allow(unexpected_cfgs)] // The `sel!` macro in older `objc` crates trips this lint

use cocoa::appkit::{NSApp, NSApplication, NSEventModifierFlags, NSMenu, NSMenuItem};
use cocoa::base::{id, nil};
use cocoa::foundation::NSString;
use objc::runtime::Sel;
use objc::{sel, sel_impl};

fn ns(s: &str) -> id {
    unsafe { NSString::alloc(nil).init_str(s) }
}

unsafe fn add_item(menu: id, title: &str, action: Sel, key: &str) {
    let item =
        NSMenuItem::alloc(nil).initWithTitle_action_keyEquivalent_(ns(title), action, ns(key));
    item.setKeyEquivalentModifierMask_(NSEventModifierFlags::NSCommandKeyMask);
    menu.addItem_(item);
}

unsafe fn add_submenu(menubar: id, title: &str) -> id {
    let holder = NSMenuItem::new(nil);
    menubar.addItem_(holder);
    let menu = NSMenu::alloc(nil).initWithTitle_(ns(title));
    holder.setSubmenu_(menu);
    menu
}

/// Installs a minimal main menu before the WebView is created.
///
/// wry (0.37) forwards `keyDown:` to `NSApp.mainMenu.performKeyEquivalent(_)`
/// and crashes when `mainMenu` is `nil`. The Edit menu also gives the search
/// field the usual Cmd+C / Cmd+V / Cmd+X / Cmd+A shortcuts.
pub fn ensure_main_menu() {
    unsafe {
        let app = NSApp();
        let current: id = app.mainMenu();
        if current != nil {
            return;
        }

        let menubar: id = NSMenu::new(nil);
        app.setMainMenu_(menubar);

        let app_menu = add_submenu(menubar, "FSC");
        add_item(app_menu, "Quit FSC", sel!(terminate:), "q");

        let edit_menu = add_submenu(menubar, "Edit");
        add_item(edit_menu, "Cut", sel!(cut:), "x");
        add_item(edit_menu, "Copy", sel!(copy:), "c");
        add_item(edit_menu, "Paste", sel!(paste:), "v");
        add_item(edit_menu, "Select All", sel!(selectAll:), "a");
    }
}
