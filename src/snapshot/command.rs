use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::assets::decode::decode_image;
use crate::foundation::core::{Canvas, Coordinate};
use crate::foundation::error::{TrackArtError, TrackArtResult};
use crate::geo::bounds::BoundingBox;
use crate::snapshot::provider::{MapSnapshotProvider, TrackLine};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const STDERR_TAIL_BYTES: usize = 2048;

/// Request document written to the renderer's stdin.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SnapshotRequest<'a> {
    /// Requested raster width.
    pub width: u32,
    /// Requested raster height.
    pub height: u32,
    /// `[lat, lon]` of the bounding box center.
    pub center: [f64; 2],
    /// Track extent.
    pub bounds: BoundingBox,
    /// Every track point as `[lat, lon]`, in order.
    pub coordinates: Vec<[f64; 2]>,
    /// How to draw the track line.
    pub line: &'a TrackLine,
}

/// Provider that delegates to an external renderer program (for example a headless browser
/// script driving a web map).
///
/// The program receives one [`SnapshotRequest`] JSON document on stdin and must write an encoded
/// image (PNG or JPEG) to stdout and exit with status 0. Nothing touches the filesystem. A run that
/// exceeds `timeout` is killed.
#[derive(Clone, Debug)]
pub struct CommandMapProvider {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
    line: TrackLine,
}

impl CommandMapProvider {
    /// Provider running `program` with no extra arguments and a 30 second timeout.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
            line: TrackLine::default(),
        }
    }

    /// Append command-line arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the track line styling sent to the renderer.
    pub fn line(mut self, line: TrackLine) -> Self {
        self.line = line;
        self
    }

    fn request_json(
        &self,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<Vec<u8>> {
        let bounds = BoundingBox::compute(coords)
            .map_err(|e| TrackArtError::snapshot(format!("no track to render: {e}")))?;
        let center = bounds.center();
        let req = SnapshotRequest {
            width,
            height,
            center: [center.lat, center.lon],
            bounds,
            coordinates: coords.iter().map(|c| [c.lat, c.lon]).collect(),
            line: &self.line,
        };
        serde_json::to_vec(&req)
            .map_err(|e| TrackArtError::snapshot(format!("encode snapshot request: {e}")))
    }

    fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl MapSnapshotProvider for CommandMapProvider {
    #[tracing::instrument(
        skip(self, coords),
        fields(program = %self.program_display(), points = coords.len())
    )]
    fn snapshot(
        &mut self,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<Canvas> {
        let request = self.request_json(coords, width, height)?;
        let program = self.program_display();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TrackArtError::snapshot(format!("failed to spawn map renderer '{program}': {e}"))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            TrackArtError::snapshot("failed to open map renderer stdin (unexpected)")
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            TrackArtError::snapshot("failed to open map renderer stdout (unexpected)")
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            TrackArtError::snapshot("failed to open map renderer stderr (unexpected)")
        })?;

        // A renderer that exits without reading stdin yields a broken pipe; its exit status is
        // what gets reported.
        let writer = std::thread::spawn(move || {
            let _ = stdin.write_all(&request);
        });
        let stdout_drain = drain(stdout);
        let stderr_drain = drain(stderr);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(TrackArtError::snapshot(format!(
                        "map renderer '{program}' timed out after {:?}",
                        self.timeout
                    )));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(TrackArtError::snapshot(format!(
                        "failed waiting for map renderer '{program}': {e}"
                    )));
                }
            }
        };

        let _ = writer.join();
        let out = join_drain(stdout_drain, "stdout")?;
        let err = join_drain(stderr_drain, "stderr")?;

        if !status.success() {
            return Err(TrackArtError::snapshot(format!(
                "map renderer '{program}' exited with {status}: {}",
                stderr_tail(&err)
            )));
        }
        if out.is_empty() {
            return Err(TrackArtError::snapshot(format!(
                "map renderer '{program}' produced no image"
            )));
        }

        let snap = decode_image(&out).map_err(|e| {
            TrackArtError::snapshot(format!("map renderer '{program}' output is not an image: {e}"))
        })?;
        if snap.dimensions() != (width, height) {
            tracing::warn!(
                want_w = width,
                want_h = height,
                got_w = snap.width(),
                got_h = snap.height(),
                "map renderer returned a different size"
            );
        }
        Ok(snap)
    }

    fn name(&self) -> &str {
        "command"
    }
}

fn drain(mut r: impl Read + Send + 'static) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_drain(
    handle: JoinHandle<std::io::Result<Vec<u8>>>,
    what: &str,
) -> TrackArtResult<Vec<u8>> {
    handle
        .join()
        .map_err(|_| TrackArtError::snapshot(format!("map renderer {what} reader panicked")))?
        .map_err(|e| TrackArtError::snapshot(format!("read map renderer {what}: {e}")))
}

fn stderr_tail(bytes: &[u8]) -> String {
    let start = bytes.len().saturating_sub(STDERR_TAIL_BYTES);
    let s = String::from_utf8_lossy(&bytes[start..]);
    let s = s.trim();
    if s.is_empty() {
        "(no stderr)".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/command.rs"]
mod tests;
