use anyhow::{Context, Result};
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt as _, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// Connection to the X server plus the root window the status text lands on.
///
/// dwm-style window managers render whatever sits in the root window's
/// `WM_NAME` property as their status area. The connection closes when this
/// is dropped.
pub struct StatusDisplay {
    conn: RustConnection,
    root: Window,
}

impl StatusDisplay {
    /// Connect to the display named by `$DISPLAY`.
    pub fn open() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to the X server")?;
        let root = conn.setup().roots[screen_num].root;
        info!(screen = screen_num, root = root, "connected to X11");

        Ok(Self { conn, root })
    }

    /// Replace the root window's name with `text` and wait until the server
    /// has processed it, so the window manager repaints at once.
    pub fn publish(&self, text: &str) -> Result<()> {
        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.root,
                AtomEnum::WM_NAME,
                AtomEnum::STRING,
                text.as_bytes(),
            )
            .context("Failed to store the root window name")?;

        // A request with a reply forces everything queued before it to be
        // processed first, which is all XSync ever did.
        self.conn
            .get_input_focus()
            .context("Failed to start X server round trip")?
            .reply()
            .context("Failed to finish X server round trip")?;

        Ok(())
    }
}
