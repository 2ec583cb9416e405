use std::process::ExitStatus;

/// Exit status plus whatever output was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    pub status: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CmdOutput {
    pub(crate) fn dry_run() -> Self {
        Self {
            status: 0,
            stdout: Some(String::new()),
            stderr: Some(String::new()),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// stderr if non-empty, then stdout, then nothing.
    pub fn error_text(&self) -> &str {
        match (self.stderr.as_deref(), self.stdout.as_deref()) {
            (Some(err), _) if !err.is_empty() => err,
            (_, Some(out)) => out,
            _ => "",
        }
    }
}

impl From<CmdOutput> for (i32, Option<String>, Option<String>) {
    fn from(out: CmdOutput) -> Self {
        (out.status, out.stdout, out.stderr)
    }
}

/// Best-effort UTF-8: bytes that don't decode are dropped, then trimmed.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text.trim().to_string()
}

pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
