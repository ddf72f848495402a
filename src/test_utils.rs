//! Test utilities and fixtures for trackstamp tests.
//!
//! This module provides a ready-made [`TagSet`], catalog mocks wired into a
//! small album, and minimal container files (MP3, AIFF, ADTS, FLAC, Ogg
//! Vorbis, Opus, M4A) that lofty accepts.
//!
//! # Example
//!
//! ```ignore
//! use trackstamp::test_utils::{sample_tag_set, write_minimal_mp3};
//!
//! #[test]
//! fn test_something() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let path = write_minimal_mp3(dir.path(), "song.mp3");
//!     let tags = sample_tag_set();
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::traits::mocks::{MockAlbum, MockTrack};
use crate::tags::{AsciiPolicy, TagSet, TagValue};

/// A fully populated tag set: track 3 of 11 on disc 1 of 2, released 2004.
///
/// Customize with struct update syntax or by assigning fields:
///
/// ```ignore
/// let mut tags = sample_tag_set();
/// tags.genres = None;
/// ```
pub fn sample_tag_set() -> TagSet {
    let text = |s: &str| TagValue::new(s, AsciiPolicy::Ignore);
    TagSet {
        ascii_only: false,
        album: Some(text("Test Album")),
        artists: text("Test Artist"),
        album_artist: Some(text("Test Band")),
        title: text("Test Track"),
        year: 2004,
        disc_idx: 1,
        num_discs: 2,
        track_idx: 3,
        num_tracks: 11,
        genres: Some(vec![text("Rock"), text("Jazz")]),
        comment: Some(text("Ripped for testing")),
        grouping: Some(text("Test Group")),
    }
}

/// An album with two discs: tracks 1-3 on disc 1, 1-2 on disc 2.
pub fn sample_album() -> MockAlbum {
    MockAlbum::new("Test Album", "Test Band", 2004)
        .with_tracks(&[(1, 1), (1, 2), (1, 3), (2, 1), (2, 2)])
}

/// Track 2 on disc 1 of [`sample_album`].
pub fn sample_track() -> MockTrack {
    MockTrack::new("Test Track", &["Test Artist", "Guest"], 1, 2, sample_album())
}

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, stereo, no padding.
const MP3_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
const MP3_FRAME_LEN: usize = 417;

/// A headerless MP3 stream of silent frames.
pub fn minimal_mp3_bytes() -> Vec<u8> {
    let mut frame = vec![0u8; MP3_FRAME_LEN];
    frame[..4].copy_from_slice(&MP3_FRAME_HEADER);
    frame.repeat(10)
}

/// A FLAC stream holding only a STREAMINFO block: 44.1 kHz, 16-bit, stereo.
pub fn minimal_flac_bytes() -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();
    // Last-metadata-block flag + STREAMINFO, 34 bytes
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    // Min/max block size: 4096
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
    // Min/max frame size: unknown
    bytes.extend_from_slice(&[0x00; 6]);
    // 44100 Hz, 2 channels, 16 bits, 0 samples
    bytes.extend_from_slice(&[0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    // MD5 of the (empty) audio
    bytes.extend_from_slice(&[0x00; 16]);
    bytes
}

/// [`minimal_flac_bytes`] followed by `audio` standing in for frame data.
pub fn minimal_flac_with_audio(audio: &[u8]) -> Vec<u8> {
    let mut bytes = minimal_flac_bytes();
    bytes.extend_from_slice(audio);
    bytes
}

/// An uncompressed AIFF with one stereo 16-bit sample frame at 44.1 kHz.
pub fn minimal_aiff_bytes() -> Vec<u8> {
    let mut comm = Vec::new();
    comm.extend_from_slice(&2u16.to_be_bytes());
    comm.extend_from_slice(&1u32.to_be_bytes());
    comm.extend_from_slice(&16u16.to_be_bytes());
    // 44100 as an 80-bit extended float
    comm.extend_from_slice(&[0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);

    // Offset, block size, then one sample frame
    let ssnd = [0u8; 12];

    let mut body = b"AIFF".to_vec();
    for (id, chunk) in [(b"COMM", &comm[..]), (b"SSND", &ssnd[..])] {
        body.extend_from_slice(id);
        body.extend_from_slice(&(chunk.len() as u32).to_be_bytes());
        body.extend_from_slice(chunk);
    }

    let mut bytes = b"FORM".to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

/// MPEG-4 AAC LC, 44.1 kHz, stereo, no CRC; 16 bytes per frame.
const ADTS_FRAME_HEADER: [u8; 7] = [0xFF, 0xF1, 0x50, 0x80, 0x02, 0x1F, 0xFC];
const ADTS_FRAME_LEN: usize = 16;

/// A raw ADTS stream of empty frames.
pub fn minimal_adts_bytes() -> Vec<u8> {
    let mut frame = vec![0u8; ADTS_FRAME_LEN];
    frame[..7].copy_from_slice(&ADTS_FRAME_HEADER);
    frame.repeat(10)
}

const OGG_SERIAL: u32 = 0x5452_4B53;

fn ogg_crc(page: &[u8]) -> u32 {
    let mut crc = 0u32;
    for &byte in page {
        crc ^= u32::from(byte) << 24;
        for _ in 0..8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ 0x04C1_1DB7
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// One Ogg page holding a single packet shorter than 255 bytes.
fn ogg_page(header_type: u8, granule: u64, sequence: u32, packet: &[u8]) -> Vec<u8> {
    assert!(packet.len() < 255, "fixture packets fit in one segment");
    let mut page = b"OggS".to_vec();
    page.push(0);
    page.push(header_type);
    page.extend_from_slice(&granule.to_le_bytes());
    page.extend_from_slice(&OGG_SERIAL.to_le_bytes());
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&[0; 4]);
    page.push(1);
    page.push(packet.len() as u8);
    page.extend_from_slice(packet);

    let crc = ogg_crc(&page);
    page[22..26].copy_from_slice(&crc.to_le_bytes());
    page
}

fn comment_packet(signature: &[u8], vendor: &str, framing: bool) -> Vec<u8> {
    let mut packet = signature.to_vec();
    packet.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    packet.extend_from_slice(vendor.as_bytes());
    packet.extend_from_slice(&0u32.to_le_bytes());
    if framing {
        packet.push(1);
    }
    packet
}

/// Ogg Vorbis header pages (identification, comments, setup) and one audio page.
pub fn minimal_ogg_vorbis_bytes() -> Vec<u8> {
    let mut ident = b"\x01vorbis".to_vec();
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.push(2);
    ident.extend_from_slice(&44_100u32.to_le_bytes());
    ident.extend_from_slice(&0i32.to_le_bytes());
    ident.extend_from_slice(&128_000i32.to_le_bytes());
    ident.extend_from_slice(&0i32.to_le_bytes());
    ident.push(0xB8);
    ident.push(1);

    let comments = comment_packet(b"\x03vorbis", "trackstamp fixture", true);
    let mut setup = b"\x05vorbis".to_vec();
    setup.extend_from_slice(&[0u8; 16]);

    let mut bytes = ogg_page(0x02, 0, 0, &ident);
    bytes.extend(ogg_page(0x00, 0, 1, &comments));
    bytes.extend(ogg_page(0x00, 0, 2, &setup));
    bytes.extend(ogg_page(0x04, 1024, 3, &[0u8; 32]));
    bytes
}

/// Opus header pages (OpusHead, OpusTags) and one audio page.
pub fn minimal_opus_bytes() -> Vec<u8> {
    let mut head = b"OpusHead".to_vec();
    head.push(1);
    head.push(2);
    head.extend_from_slice(&312u16.to_le_bytes());
    head.extend_from_slice(&48_000u32.to_le_bytes());
    head.extend_from_slice(&0i16.to_le_bytes());
    head.push(0);

    let tags = comment_packet(b"OpusTags", "trackstamp fixture", false);

    let mut bytes = ogg_page(0x02, 0, 0, &head);
    bytes.extend(ogg_page(0x00, 0, 1, &tags));
    bytes.extend(ogg_page(0x04, 960, 2, &[0xFC, 0xFF, 0xFE]));
    bytes
}

fn mp4_atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut atom = ((content.len() + 8) as u32).to_be_bytes().to_vec();
    atom.extend_from_slice(fourcc);
    atom.extend_from_slice(content);
    atom
}

/// An M4A with `ftyp`, a `moov` holding only `mvhd`, and a small `mdat`.
pub fn minimal_m4a_bytes() -> Vec<u8> {
    let mut ftyp = b"M4A ".to_vec();
    ftyp.extend_from_slice(&0u32.to_be_bytes());
    ftyp.extend_from_slice(b"M4A isom");

    let mut bytes = mp4_atom(b"ftyp", &ftyp);
    bytes.extend(mp4_atom(b"moov", &mp4_atom(b"mvhd", &[0u8; 100])));
    bytes.extend(mp4_atom(b"mdat", &[0u8; 16]));
    bytes
}

/// Write `bytes` to `dir/name`.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    path
}

/// Write [`minimal_mp3_bytes`] to `dir/name`.
pub fn write_minimal_mp3(dir: &Path, name: &str) -> PathBuf {
    write_fixture(dir, name, &minimal_mp3_bytes())
}

/// Write [`minimal_flac_bytes`] to `dir/name`.
pub fn write_minimal_flac(dir: &Path, name: &str) -> PathBuf {
    write_fixture(dir, name, &minimal_flac_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogAlbum, CatalogTrack};

    #[test]
    fn test_sample_tag_set_defaults() {
        let tags = sample_tag_set();
        assert_eq!(tags.title(), "Test Track");
        assert_eq!(tags.track_idx_and_total(), "3/11");
        assert_eq!(tags.genres(), Some(vec!["Rock", "Jazz"]));
    }

    #[test]
    fn test_sample_track_belongs_to_album() {
        let track = sample_track();
        assert_eq!(track.album().name(), "Test Album");
        assert_eq!(track.disc(), 1);
        assert_eq!(track.index(), 2);
    }

    #[test]
    fn test_minimal_fixture_sizes() {
        assert_eq!(minimal_mp3_bytes().len(), MP3_FRAME_LEN * 10);
        // magic + block header + STREAMINFO
        assert_eq!(minimal_flac_bytes().len(), 4 + 4 + 34);
    }

    #[test]
    fn test_container_fixtures_have_magic() {
        assert!(minimal_aiff_bytes().starts_with(b"FORM"));
        assert_eq!(&minimal_aiff_bytes()[8..12], b"AIFF");
        assert_eq!(minimal_adts_bytes().len(), ADTS_FRAME_LEN * 10);
        assert_eq!(&minimal_m4a_bytes()[4..8], b"ftyp");

        let vorbis = minimal_ogg_vorbis_bytes();
        assert_eq!(&vorbis[29..35], b"vorbis");
        let opus = minimal_opus_bytes();
        assert_eq!(&opus[28..36], b"OpusHead");
    }

    #[test]
    fn test_ogg_crc_matches_reference() {
        // CRC-32/OGG check value
        assert_eq!(ogg_crc(b"123456789"), 0x89A1_897F);
    }

    #[test]
    fn test_fixture_files_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let mp3 = write_minimal_mp3(dir.path(), "a.mp3");
        let flac = write_minimal_flac(dir.path(), "a.flac");
        assert!(mp3.exists());
        assert!(std::fs::read(flac).unwrap().starts_with(b"fLaC"));
    }
}
