//! Human-readable report of what was written to one file.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use lofty::probe::Probe;

use crate::adapters::{OutputFormat, WrittenTag};
use crate::error::{Result, TaggingResultExt};
use crate::tags::TagSet;

/// One "what was set" line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub label: &'static str,
    pub value: Option<String>,
}

impl SummaryField {
    fn set(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: Some(value.into()),
        }
    }

    fn flag(label: &'static str) -> Self {
        Self { label, value: None }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.label, value),
            None => f.write_str(self.label),
        }
    }
}

/// Per-field description of a tag set, in write order.
pub fn describe_fields(tags: &TagSet, cover_embedded: bool) -> Vec<SummaryField> {
    let mut fields = vec![SummaryField::set("Setting artist", tags.artists())];

    if let Some(album) = tags.album() {
        fields.push(SummaryField::set("Setting album", album));
    }
    if let Some(album_artist) = tags.album_artist() {
        fields.push(SummaryField::set("Setting album artist", album_artist));
    }
    fields.push(SummaryField::set("Setting title", tags.title()));
    fields.push(SummaryField::set(
        "Setting track info",
        format!("({}, {})", tags.track_idx(), tags.num_tracks()),
    ));
    fields.push(SummaryField::set(
        "Setting disc info",
        format!("({}, {})", tags.disc_idx(), tags.num_discs()),
    ));
    fields.push(SummaryField::set("Setting release year", tags.year()));

    if let Some(genres) = tags.genres() {
        fields.push(SummaryField::set("Setting genres", genres.join(" / ")));
    }
    if cover_embedded {
        fields.push(SummaryField::flag("Adding cover image"));
    }
    if let Some(comment) = tags.comment() {
        fields.push(SummaryField::set("Adding comment", comment));
    }
    if let Some(grouping) = tags.grouping() {
        fields.push(SummaryField::set("Adding grouping", grouping));
    }

    fields
}

/// Stream properties of the tagged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioLine {
    pub duration: Duration,
    pub bitrate_kbps: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
}

impl AudioLine {
    /// Read stream properties from `path`.
    ///
    /// Lossless formats report the raw PCM rate rather than the compressed one.
    pub fn probe(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = Probe::open(path).for_path(path)?.read().for_path(path)?;
        let props = file.properties();

        let bitrate_kbps = if format.is_lossless() {
            match (props.bit_depth(), props.sample_rate(), props.channels()) {
                (Some(depth), Some(rate), Some(channels)) => {
                    Some(u32::from(depth) * rate * u32::from(channels) / 1000)
                }
                _ => props.audio_bitrate(),
            }
        } else {
            props.audio_bitrate()
        };

        Ok(Self {
            duration: props.duration(),
            bitrate_kbps,
            sample_rate: props.sample_rate(),
            channels: props.channels(),
        })
    }
}

/// Format-specific technical description: codec, stream and tag container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicalLine {
    pub format: OutputFormat,
    /// Constant bitrate encoding; VBR rates are printed with a `~`
    pub cbr: bool,
    pub audio: Option<AudioLine>,
    pub container: WrittenTag,
}

impl TechnicalLine {
    fn stream_details(&self, audio: &AudioLine) -> String {
        let channels = audio.channels.map(channel_layout).unwrap_or_default();

        // Opus reports no meaningful rate, only the layout
        if self.format == OutputFormat::Opus {
            return format!("[ {channels} ]");
        }

        let bitrate = audio
            .bitrate_kbps
            .map(|kbps| {
                let rate = format!("{kbps} kb/s");
                if self.cbr { rate } else { format!("~{rate}") }
            })
            .unwrap_or_else(|| "? kb/s".to_string());
        let sample_rate = audio
            .sample_rate
            .map(|hz| hz.to_string())
            .unwrap_or_else(|| "?".to_string());

        format!("[ {bitrate} @ {sample_rate} Hz - {channels} ]")
    }
}

impl fmt::Display for TechnicalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(audio) = &self.audio {
            writeln!(
                f,
                "Time: {}\t{}\t{}",
                format_duration(audio.duration),
                self.format.codec_label(),
                self.stream_details(audio)
            )?;
        }
        write!(f, "{}", self.container)
    }
}

/// Everything the dispatcher did to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub file_name: String,
    pub file_size: u64,
    pub fields: Vec<SummaryField>,
    /// Override directives that were reported and skipped
    pub skipped_overrides: Vec<String>,
    pub technical: TechnicalLine,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(79);
        writeln!(f, "{}\t[ {} ]", self.file_name, format_size(self.file_size))?;
        writeln!(f, "{rule}")?;
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        for raw in &self.skipped_overrides {
            writeln!(f, "Skipped override: {raw}")?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.technical)?;
        write!(f, "{rule}")
    }
}

/// "Mono", "Stereo" or "N channels".
pub fn channel_layout(channels: u8) -> String {
    match channels {
        1 => "Mono".to_string(),
        2 => "Stereo".to_string(),
        n => format!("{n} channels"),
    }
}

/// Format duration as MM:SS or HH:MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Byte count with a binary unit, e.g. `"3.42 MB"`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_tag_set, write_minimal_flac};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1:01:01");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn test_channel_layout() {
        assert_eq!(channel_layout(1), "Mono");
        assert_eq!(channel_layout(2), "Stereo");
        assert_eq!(channel_layout(6), "6 channels");
    }

    #[test]
    fn test_describe_fields() {
        let tags = sample_tag_set();
        let lines: Vec<String> = describe_fields(&tags, true)
            .iter()
            .map(|f| f.to_string())
            .collect();

        assert_eq!(lines[0], "Setting artist: Test Artist");
        assert!(lines.contains(&"Setting track info: (3, 11)".to_string()));
        assert!(lines.contains(&"Setting disc info: (1, 2)".to_string()));
        assert!(lines.contains(&"Setting genres: Rock / Jazz".to_string()));
        assert!(lines.contains(&"Adding cover image".to_string()));
        assert!(lines.contains(&"Adding grouping: Test Group".to_string()));
    }

    #[test]
    fn test_describe_fields_skips_absent_values() {
        let mut tags = sample_tag_set();
        tags.genres = None;
        tags.comment = None;
        let fields = describe_fields(&tags, false);

        assert!(fields.iter().all(|f| f.label != "Setting genres"));
        assert!(fields.iter().all(|f| f.label != "Adding comment"));
        assert!(fields.iter().all(|f| f.label != "Adding cover image"));
    }

    fn line(format: OutputFormat, cbr: bool) -> TechnicalLine {
        TechnicalLine {
            format,
            cbr,
            audio: Some(AudioLine {
                duration: Duration::from_secs(200),
                bitrate_kbps: Some(320),
                sample_rate: Some(44100),
                channels: Some(2),
            }),
            container: WrittenTag::Id3 { minor: 4, frames: 10 },
        }
    }

    #[test]
    fn test_technical_line_marks_vbr() {
        let vbr = line(OutputFormat::Mp3, false).to_string();
        assert!(vbr.starts_with("Time: 3:20\tMPEG Layer III\t[ ~320 kb/s @ 44100 Hz - Stereo ]"));
        assert!(vbr.ends_with("ID3 v2.4: 10 frames"));

        let cbr = line(OutputFormat::Mp3, true).to_string();
        assert!(cbr.contains("[ 320 kb/s @ 44100 Hz - Stereo ]"));
    }

    #[test]
    fn test_technical_line_opus_shows_layout_only() {
        let out = line(OutputFormat::Opus, false).to_string();
        assert!(out.contains("Opus Codec\t[ Stereo ]"));
    }

    #[test]
    fn test_technical_line_without_audio() {
        let technical = TechnicalLine {
            audio: None,
            ..line(OutputFormat::M4a, false)
        };
        assert_eq!(technical.to_string(), "ID3 v2.4: 10 frames");
    }

    #[test]
    fn test_lossless_bitrate_from_sample_format() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = write_minimal_flac(temp.path(), "a.flac");

        let audio = AudioLine::probe(&path, OutputFormat::Flac).unwrap();
        // 16 bit * 44100 Hz * 2 channels
        assert_eq!(audio.bitrate_kbps, Some(1411));
        assert_eq!(audio.sample_rate, Some(44100));
        assert_eq!(audio.channels, Some(2));
    }
}
