//! Microphone capture. There can only be one active recording at a time;
//! the recording accumulates into an in-memory WAV payload that is handed
//! to the caller on finish. The capture device must be released on every
//! exit path, so an unfinished handle finishes itself on drop.

use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::sync::Arc;

use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Host;
use hound::WavWriter;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum RecorderError {
    /// generic anyhow error
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
    /// No recording device available
    #[error("no input device available")]
    NoInputDevice,
    /// Sample format not supported
    #[error("sample format not supported: {0}")]
    SampleFormatNotSupported(String),
    /// Build stream error
    #[error(transparent)]
    BuildStream(#[from] cpal::BuildStreamError),
}

type Result<T> = std::result::Result<T, RecorderError>;
type WavWriterHandle = Arc<Mutex<Option<WavWriter<MemoryWriter>>>>;

/// Seam between the recording controller and the capture hardware.
/// The real implementation is [`Recorder`]; tests substitute fakes.
pub trait Capture {
    /// Begin a recording session, acquiring the input device.
    fn start(&mut self) -> Result<Box<dyn CaptureHandle>>;
}

/// An active recording session. Finishing releases the device and yields
/// the accumulated audio payload.
pub trait CaptureHandle {
    /// Stop the session and return the payload. Idempotent: returns
    /// `None` once the session has already been finished.
    fn finish(&mut self) -> Result<Option<Vec<u8>>>;
}

/// A cheaply cloneable handle to the inner data that is being recorded.
/// The finalize method for the wav writer does not return the inner data,
/// so we store it behind an Arc<Mutex> to allow for cheap cloning and
/// access to the inner data.
#[derive(Clone)]
struct MemoryWriter {
    inner: Arc<Mutex<Cursor<Vec<u8>>>>,
}

impl MemoryWriter {
    fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Cursor::new(Vec::with_capacity(8 * 1024)))),
        }
    }

    fn try_into_inner(self) -> Result<Vec<u8>> {
        let owned = Arc::try_unwrap(self.inner).map_err(|_| {
            RecorderError::Anyhow(anyhow!("Failed to unwrap inner Arc in MemoryWriter"))
        })?;
        let cursor = owned.into_inner();
        Ok(cursor.into_inner())
    }
}

impl Seek for MemoryWriter {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.lock().seek(pos)
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

/// Recorder over the host's default input device.
pub struct Recorder {
    host: Host,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    pub fn start_recording(&self) -> Result<RecordingHandle> {
        let device = self
            .host
            .default_input_device()
            .ok_or(RecorderError::NoInputDevice)?;
        let config = device
            .default_input_config()
            .map_err(|_| RecorderError::NoInputDevice)?;

        info!(device_name = %device.name().unwrap_or_else(|_| "unknown".into()), config = ?config, "Recording from device");

        let spec = wav_spec_from_config(&config);

        let buffer = MemoryWriter::new();
        let writer =
            WavWriter::new(buffer.clone(), spec).map_err(|e| RecorderError::Anyhow(e.into()))?;
        let writer = Arc::new(Mutex::new(Some(writer)));

        let writer_2 = writer.clone();

        let err_fn = move |err| {
            error!("an error occurred on stream: {}", err);
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_input_stream(
                &config.into(),
                move |data: &[f32], _: &_| write_samples(data, &writer_2),
                err_fn,
                None,
            )?,
            sample_format => {
                return Err(RecorderError::SampleFormatNotSupported(format!(
                    "{:?}",
                    sample_format
                )));
            }
        };

        stream
            .play()
            .map_err(|_| anyhow!("failed to play stream"))?;

        Ok(RecordingHandle {
            stream,
            writer,
            buffer: Some(buffer),
        })
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture for Recorder {
    fn start(&mut self) -> Result<Box<dyn CaptureHandle>> {
        Ok(Box::new(self.start_recording()?))
    }
}

/// Handle to the active recording. When dropped or finished, the
/// recording ends and the device is released. You must call `finish` to
/// receive the data.
pub struct RecordingHandle {
    stream: cpal::Stream,
    writer: WavWriterHandle,
    // The buffer the data is being written to. Presence of this buffer
    // indicates if the recording has been finished or not.
    buffer: Option<MemoryWriter>,
}

impl RecordingHandle {
    pub fn finish(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(buffer) = self.buffer.take() else {
            return Ok(None);
        };
        info!("Ending recording.");
        // Pause stops the hardware callbacks; the stream itself is freed
        // when the handle drops.
        self.stream.pause().ok();
        // Finalize the writer so it writes the proper framing information.
        self.writer
            .lock()
            .take()
            .ok_or_else(|| anyhow!("recording writer already taken"))?
            .finalize()
            .map_err(|e| RecorderError::Anyhow(anyhow!("Failed to finalize writer: {}", e)))?;
        // Now that it's ended, we can grab out the actual data and return it.
        let data = buffer.try_into_inner()?;
        Ok(Some(data))
    }
}

impl CaptureHandle for RecordingHandle {
    fn finish(&mut self) -> Result<Option<Vec<u8>>> {
        RecordingHandle::finish(self)
    }
}

impl Drop for RecordingHandle {
    fn drop(&mut self) {
        if self.buffer.is_some() {
            if let Err(e) = self.finish() {
                error!("failed to finalize recording: {}", e);
            }
        }
    }
}

fn wav_spec_from_config(config: &cpal::SupportedStreamConfig) -> hound::WavSpec {
    hound::WavSpec {
        channels: config.channels(),
        sample_rate: config.sample_rate().0,
        bits_per_sample: (config.sample_format().sample_size() * 8) as _,
        sample_format: sample_format(config.sample_format()),
    }
}

fn sample_format(format: cpal::SampleFormat) -> hound::SampleFormat {
    if format.is_float() {
        hound::SampleFormat::Float
    } else {
        hound::SampleFormat::Int
    }
}

/// Append a hardware callback's samples to the writer. Arrival order is
/// preserved; a finished writer ignores late callbacks.
fn write_samples(data: &[f32], writer: &WavWriterHandle) {
    if let Some(mut guard) = writer.try_lock() {
        if let Some(writer) = guard.as_mut() {
            for &sample in data.iter() {
                writer.write_sample(sample).ok();
            }
        }
    }
}
