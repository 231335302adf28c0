use std::io::Write;

/// Blocking, user-visible message.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Writes alerts to a sink (stderr by default) as `! message`.
pub struct TerminalNotifier<W: Write> {
    out: W,
}

impl TerminalNotifier<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn alert(&mut self, message: &str) {
        tracing::warn!(%message, "alert");
        if let Err(e) = writeln!(self.out, "! {message}") {
            tracing::error!(err = %e, "failed to write alert");
        }
    }
}
