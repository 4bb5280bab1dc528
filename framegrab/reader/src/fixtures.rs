/*!
    Tiny generated clips for decoder tests.

    Builds uncompressed AVI files byte by byte so tests do not depend on
    binary assets or an `ffmpeg` binary being installed. The AVI stream
    header carries an explicit frame count, which keeps the probed
    metadata deterministic.
*/

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

pub(crate) const CLIP_WIDTH: u32 = 4;
pub(crate) const CLIP_HEIGHT: u32 = 4;

const FRAME_BYTES: u32 = CLIP_WIDTH * CLIP_HEIGHT * 3;

/**
    Write a 4x4, 25 fps uncompressed AVI with one uniform-colour frame per
    `[r, g, b]` entry and return its path.
*/
pub(crate) fn write_clip(colors: &[[u8; 3]]) -> PathBuf {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "framegrab-clip-{}-{seq}.avi",
        std::process::id()
    ));
    std::fs::write(&path, build_avi(colors)).unwrap();
    path
}

fn u32le(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn u16le(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn tag(out: &mut Vec<u8>, t: &[u8; 4]) {
    out.extend_from_slice(t);
}

fn build_avi(colors: &[[u8; 3]]) -> Vec<u8> {
    let n = colors.len() as u32;

    // BITMAPINFOHEADER, 24-bit BI_RGB.
    let mut strf = Vec::new();
    u32le(&mut strf, 40); // header size
    u32le(&mut strf, CLIP_WIDTH);
    u32le(&mut strf, CLIP_HEIGHT);
    u16le(&mut strf, 1); // planes
    u16le(&mut strf, 24); // bits per pixel
    u32le(&mut strf, 0); // BI_RGB
    u32le(&mut strf, FRAME_BYTES);
    u32le(&mut strf, 0);
    u32le(&mut strf, 0);
    u32le(&mut strf, 0);
    u32le(&mut strf, 0);

    // AVIStreamHeader: one 25 fps video stream of `n` frames.
    let mut strh = Vec::new();
    tag(&mut strh, b"vids");
    tag(&mut strh, b"DIB ");
    u32le(&mut strh, 0); // flags
    u16le(&mut strh, 0); // priority
    u16le(&mut strh, 0); // language
    u32le(&mut strh, 0); // initial frames
    u32le(&mut strh, 1); // scale
    u32le(&mut strh, 25); // rate
    u32le(&mut strh, 0); // start
    u32le(&mut strh, n); // length, in frames
    u32le(&mut strh, FRAME_BYTES); // suggested buffer size
    u32le(&mut strh, 0xFFFF_FFFF); // quality
    u32le(&mut strh, FRAME_BYTES); // sample size
    u16le(&mut strh, 0);
    u16le(&mut strh, 0);
    u16le(&mut strh, CLIP_WIDTH as u16);
    u16le(&mut strh, CLIP_HEIGHT as u16);

    let mut strl = Vec::new();
    tag(&mut strl, b"strl");
    tag(&mut strl, b"strh");
    u32le(&mut strl, strh.len() as u32);
    strl.extend_from_slice(&strh);
    tag(&mut strl, b"strf");
    u32le(&mut strl, strf.len() as u32);
    strl.extend_from_slice(&strf);

    let mut avih = Vec::new();
    u32le(&mut avih, 40_000); // microseconds per frame
    u32le(&mut avih, FRAME_BYTES * 25); // max bytes per second
    u32le(&mut avih, 0); // padding granularity
    u32le(&mut avih, 0x10); // AVIF_HASINDEX
    u32le(&mut avih, n); // total frames
    u32le(&mut avih, 0); // initial frames
    u32le(&mut avih, 1); // streams
    u32le(&mut avih, FRAME_BYTES); // suggested buffer size
    u32le(&mut avih, CLIP_WIDTH);
    u32le(&mut avih, CLIP_HEIGHT);
    for _ in 0..4 {
        u32le(&mut avih, 0); // reserved
    }

    let mut hdrl = Vec::new();
    tag(&mut hdrl, b"hdrl");
    tag(&mut hdrl, b"avih");
    u32le(&mut hdrl, avih.len() as u32);
    hdrl.extend_from_slice(&avih);
    tag(&mut hdrl, b"LIST");
    u32le(&mut hdrl, strl.len() as u32);
    hdrl.extend_from_slice(&strl);

    // One '00db' chunk of BGR pixels per frame. DIB rows are bottom-up,
    // which does not matter for uniform frames.
    let mut movi = Vec::new();
    tag(&mut movi, b"movi");
    let mut offsets = Vec::new();
    for [r, g, b] in colors {
        offsets.push(movi.len() as u32);
        tag(&mut movi, b"00db");
        u32le(&mut movi, FRAME_BYTES);
        for _ in 0..(CLIP_WIDTH * CLIP_HEIGHT) {
            movi.extend_from_slice(&[*b, *g, *r]);
        }
    }

    // Index entry offsets are relative to the 'movi' fourcc.
    let mut idx1 = Vec::new();
    for offset in &offsets {
        tag(&mut idx1, b"00db");
        u32le(&mut idx1, 0x10); // AVIIF_KEYFRAME
        u32le(&mut idx1, *offset);
        u32le(&mut idx1, FRAME_BYTES);
    }

    let mut file = Vec::new();
    tag(&mut file, b"RIFF");
    let riff_len = 4 + 8 + hdrl.len() + 8 + movi.len() + 8 + idx1.len();
    u32le(&mut file, riff_len as u32);
    tag(&mut file, b"AVI ");
    tag(&mut file, b"LIST");
    u32le(&mut file, hdrl.len() as u32);
    file.extend_from_slice(&hdrl);
    tag(&mut file, b"LIST");
    u32le(&mut file, movi.len() as u32);
    file.extend_from_slice(&movi);
    tag(&mut file, b"idx1");
    u32le(&mut file, idx1.len() as u32);
    file.extend_from_slice(&idx1);
    file
}
