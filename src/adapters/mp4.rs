//! MP4 atom reader and writer for M4A and ALAC files.

use std::fs::File;
use std::path::Path;

use lofty::file::AudioFile;
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::tag::{Accessor, TagExt};

use crate::cover::CoverImage;
use crate::error::{Result, TaggingResultExt};
use crate::tags::TagSet;

use super::{WrittenTag, cover_picture, parse_options, write_options};

fn text_atom(fourcc: &[u8; 4], value: impl Into<String>) -> Atom<'static> {
    Atom::new(AtomIdent::Fourcc(*fourcc), AtomData::UTF8(value.into()))
}

/// Populate `ilst` with every field of `tags`.
///
/// `trkn` and `disk` hold an (index, total) pair; a zero total means the
/// total is unknown. A new cover replaces the whole `covr` atom.
pub fn fill_ilst(ilst: &mut Ilst, tags: &TagSet, cover: Option<&CoverImage>) {
    if let Some(cover) = cover {
        ilst.remove_pictures();
        ilst.insert_picture(cover_picture(cover));
    }

    if let Some(album) = tags.album() {
        ilst.insert(text_atom(b"\xa9alb", album));
    }
    ilst.insert(text_atom(b"\xa9nam", tags.title()));
    ilst.insert(text_atom(b"\xa9ART", tags.artists()));
    if let Some(album_artist) = tags.album_artist() {
        ilst.insert(text_atom(b"aART", album_artist));
    }
    ilst.insert(text_atom(b"\xa9day", tags.year()));

    let (disc, num_discs) = tags.disc_pair();
    ilst.set_disk(disc);
    ilst.set_disk_total(num_discs);

    let (track, num_tracks) = tags.track_pair();
    ilst.set_track(track);
    ilst.set_track_total(num_tracks);

    if let Some(comment) = tags.comment() {
        ilst.insert(text_atom(b"\xa9cmt", comment));
    }
    if let Some(grouping) = tags.grouping() {
        ilst.insert(text_atom(b"\xa9grp", grouping));
    }
    if let Some(genres) = tags.genres() {
        ilst.insert(text_atom(b"\xa9gen", genres.join(", ")));
    }
}

/// The `ilst` already in an M4A/ALAC file, or an empty one.
pub fn read_ilst(path: &Path) -> Result<Ilst> {
    let mut file = File::open(path).for_path(path)?;
    let ilst = Mp4File::read_from(&mut file, parse_options())
        .for_path(path)?
        .ilst()
        .cloned()
        .unwrap_or_default();
    Ok(ilst)
}

/// Fill `ilst` and save it to the M4A/ALAC file at `path`.
pub fn write_mp4(
    mut ilst: Ilst,
    path: &Path,
    tags: &TagSet,
    cover: Option<&CoverImage>,
) -> Result<WrittenTag> {
    fill_ilst(&mut ilst, tags, cover);
    ilst.save_to_path(path, write_options(false)).for_path(path)?;

    Ok(WrittenTag::Mp4)
}
