//! ID3v2 reader and writer for MP3/AIFF (tag inside the container) and AAC
//! (tag written standalone ahead of the ADTS stream).

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use lofty::TextEncoding;
use lofty::aac::AacFile;
use lofty::file::AudioFile;
use lofty::id3::v2::{Frame, FrameId, Id3v2Tag, TextInformationFrame, TimestampFrame};
use lofty::iff::aiff::AiffFile;
use lofty::mpeg::MpegFile;
use lofty::picture::PictureType;
use lofty::tag::items::Timestamp;
use lofty::tag::{Accessor, TagExt};

use crate::cover::CoverImage;
use crate::error::{Result, TaggingResultExt};
use crate::tags::TagSet;

use super::{OutputFormat, WrittenTag, cover_picture, parse_options, write_options};

fn frame_id(id: &'static str) -> FrameId<'static> {
    FrameId::Valid(Cow::Borrowed(id))
}

fn text_frame(id: &'static str, value: impl Into<String>) -> Frame<'static> {
    Frame::Text(TextInformationFrame::new(frame_id(id), TextEncoding::UTF8, value.into()))
}

/// TDRC as a timestamp; the v2.3 writer only converts this form to TYER.
fn recording_year(year: u32) -> Frame<'static> {
    let timestamp = Timestamp {
        year: u16::try_from(year).unwrap_or(u16::MAX),
        ..Timestamp::default()
    };
    Frame::Timestamp(TimestampFrame::new(frame_id("TDRC"), TextEncoding::UTF8, timestamp))
}

/// Populate `tag` with every field of `tags`.
///
/// Genres go into a single TCON frame: NUL-separated values for v2.4, one
/// `/`-joined value for v2.3, which has no multi-value text frames.
pub fn fill_id3(tag: &mut Id3v2Tag, tags: &TagSet, cover: Option<&CoverImage>, id3_v23: bool) {
    if let Some(cover) = cover {
        tag.remove_picture_type(PictureType::CoverFront);
        tag.insert_picture(cover_picture(cover));
    }

    if let Some(album) = tags.album() {
        tag.insert(text_frame("TALB", album));
    }
    tag.insert(text_frame("TIT2", tags.title()));
    tag.insert(text_frame("TPE1", tags.artists()));
    if let Some(album_artist) = tags.album_artist() {
        tag.insert(text_frame("TPE2", album_artist));
    }

    tag.insert(recording_year(tags.year_value()));
    tag.insert(text_frame("TPOS", tags.disc_idx_and_total()));
    tag.insert(text_frame("TRCK", tags.track_idx_and_total()));

    if let Some(comment) = tags.comment() {
        tag.set_comment(comment.to_string());
    }
    if let Some(grouping) = tags.grouping() {
        tag.insert(text_frame("TIT1", grouping));
    }
    if let Some(genres) = tags.genres() {
        let separator = if id3_v23 { "/" } else { "\0" };
        tag.insert(text_frame("TCON", genres.join(separator)));
    }
}

/// The ID3v2 tag already in an MP3, AIFF or AAC file, or an empty one.
///
/// AAC has no container for the tag; lofty finds it ahead of the ADTS
/// frames and writes it back to the same place.
pub fn read_id3(format: OutputFormat, path: &Path) -> Result<Id3v2Tag> {
    let mut file = File::open(path).for_path(path)?;
    let tag = match format {
        OutputFormat::Aiff => AiffFile::read_from(&mut file, parse_options())
            .for_path(path)?
            .id3v2()
            .cloned(),
        OutputFormat::Aac => AacFile::read_from(&mut file, parse_options())
            .for_path(path)?
            .id3v2()
            .cloned(),
        _ => MpegFile::read_from(&mut file, parse_options())
            .for_path(path)?
            .id3v2()
            .cloned(),
    };
    Ok(tag.unwrap_or_default())
}

/// Fill `tag` and save it to `path` as ID3 v2.3 or v2.4.
pub fn write_id3(
    mut tag: Id3v2Tag,
    path: &Path,
    tags: &TagSet,
    cover: Option<&CoverImage>,
    id3_v23: bool,
) -> Result<WrittenTag> {
    fill_id3(&mut tag, tags, cover, id3_v23);
    tag.save_to_path(path, write_options(id3_v23)).for_path(path)?;
    Ok(WrittenTag::Id3 {
        minor: if id3_v23 { 3 } else { 4 },
        frames: tag.len(),
    })
}
