use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use practice_domain::ClipInfo;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, instrument};

/// Reads the length and format of a clip without keeping its samples.
pub struct ClipProbe;

impl ClipProbe {
    #[instrument(skip_all, fields(path = ?path.as_ref()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ClipInfo> {
        let path_ref = path.as_ref();
        let file =
            File::open(path_ref).with_context(|| format!("open audio file {:?}", path_ref))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        let mut hint = Hint::new();
        if let Some(ext) = path_ref.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .with_context(|| format!("probe audio file {:?}", path_ref))?;
        let mut format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| anyhow::anyhow!("no default track found"))?;
        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| anyhow::anyhow!("track does not declare a sample rate"))?;
        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .unwrap_or(1);

        if let Some(frames) = codec_params.n_frames {
            debug!(frames, sample_rate, "clip length read from container");
            return Ok(ClipInfo::new(sample_rate, frames, channels));
        }

        let mut decoder =
            symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;
        let frames = count_frames(format.as_mut(), decoder.as_mut(), track_id)?;
        debug!(frames, sample_rate, "clip length counted from packets");
        Ok(ClipInfo::new(sample_rate, frames, channels))
    }
}

/// Decodes every packet of `track_id` and sums the frames it yields.
fn count_frames(
    format: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
    track_id: u32,
) -> Result<u64> {
    let mut frames = 0u64;
    loop {
        match format.next_packet() {
            Ok(packet) => {
                if packet.track_id() != track_id {
                    continue;
                }
                match decoder.decode(&packet) {
                    Ok(buffer) => frames += buffer.frames() as u64,
                    Err(SymphoniaError::DecodeError(_)) => {
                        // skip undecodable packet
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(frames)
}
