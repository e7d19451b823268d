use crate::error::Error;
use crate::sprites::{flip_horizontal, CachedSprite, Frame};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

/// A list of assets loaded into memory.
#[derive(Debug, Default)]
pub(crate) struct Assets {
    sprites: BTreeMap<Frame, CachedSprite>,
}

impl Assets {
    pub(crate) fn sprite(&self, frame: Frame) -> Result<&CachedSprite, Error> {
        self.sprites.get(&frame).ok_or(Error::MissingFrame(frame))
    }

    pub(crate) fn insert(&mut self, frame: Frame, sprite: CachedSprite) {
        self.sprites.insert(frame, sprite);
    }
}

/// Load all static assets from `dir` into an `Assets` structure.
///
/// The old man is only drawn facing right (or the camera); every left-facing frame is a mirror
/// image of its right-facing twin.
pub(crate) fn load_assets(dir: &Path) -> Result<Assets, Error> {
    use Frame::*;

    const FILES: [(Frame, &str); 11] = [
        (OldManIdleRight, "oldman-idle.pcx"),
        (OldManFront, "oldman-front.pcx"),
        (OldManStride1Right, "oldman-stride-1.pcx"),
        (OldManStride2Right, "oldman-stride-2.pcx"),
        (OldManKick1Right, "oldman-kick-1.pcx"),
        (OldManKick2Right, "oldman-kick-2.pcx"),
        (OldManJumpRight, "oldman-jump.pcx"),
        (OldManFrontJump, "oldman-front-jump.pcx"),
        (Tree, "tree.pcx"),
        (Trailer, "trailer.pcx"),
        (FloorTile, "floor-tile.pcx"),
    ];
    const MIRRORED: [(Frame, Frame); 6] = [
        (OldManIdleRight, OldManIdleLeft),
        (OldManStride1Right, OldManStride1Left),
        (OldManStride2Right, OldManStride2Left),
        (OldManKick1Right, OldManKick1Left),
        (OldManKick2Right, OldManKick2Left),
        (OldManJumpRight, OldManJumpLeft),
    ];

    info!("Loading assets from `{}`", dir.display());

    let names = FILES.iter().map(|(_, name)| *name).collect::<Vec<_>>();
    let images = load_frames(dir, &names)?;

    let mut assets = Assets::default();
    for ((frame, _), image) in FILES.iter().zip(images) {
        assets.insert(*frame, image);
    }
    for (right, left) in MIRRORED {
        let mirror = flip_horizontal(assets.sprite(right)?);
        assets.insert(left, mirror);
    }

    Ok(assets)
}

/// Load a list of images from `dir`, in order.
pub(crate) fn load_frames(dir: &Path, names: &[&str]) -> Result<Vec<CachedSprite>, Error> {
    names
        .iter()
        .map(|name| load_image(&dir.join(name)))
        .collect()
}

/// Read a single image file.
pub(crate) fn load_image(path: &Path) -> Result<CachedSprite, Error> {
    let pcx = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_pcx(&pcx).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert PCX data to raw RGBA pixels.
///
/// Paletted images treat palette index 0 as transparent. RGB images are fully opaque.
fn load_pcx(pcx: &[u8]) -> std::io::Result<CachedSprite> {
    let mut reader = pcx::Reader::new(pcx)?;
    let width = reader.width() as usize;
    let height = reader.height() as usize;
    let mut result = Vec::with_capacity(width * height * 4);

    if reader.is_paletted() {
        // Read the raw pixel data
        let mut buffer = vec![0; width * height];
        for y in 0..height {
            let a = y * width;
            let b = a + width;
            reader.next_row_paletted(&mut buffer[a..b])?;
        }

        // Read the palette
        let palette_length = reader.palette_length().unwrap_or(256) as usize;
        let mut palette = vec![0; palette_length * 3];
        reader.read_palette(&mut palette)?;

        // Copy to result with an alpha component
        for pal in buffer {
            let i = pal as usize * 3;
            let alpha = if pal == 0 { 0 } else { 255 };
            result.extend_from_slice(&palette[i..i + 3]);
            result.push(alpha);
        }
    } else {
        let mut buffer = vec![0; width * 3];
        for _ in 0..height {
            // Read the raw pixel data
            reader.next_row_rgb(&mut buffer)?;

            // Copy to result with an alpha component
            for rgb in buffer.chunks_exact(3) {
                result.extend_from_slice(rgb);
                result.push(255);
            }
        }
    }

    Ok((width, height, Rc::from(result)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// In-memory assets: every frame is a small opaque block with a distinct color.
    pub(crate) fn fake_assets() -> Assets {
        use Frame::*;

        let frames = [
            OldManIdleLeft,
            OldManIdleRight,
            OldManFront,
            OldManStride1Left,
            OldManStride2Left,
            OldManStride1Right,
            OldManStride2Right,
            OldManKick1Left,
            OldManKick2Left,
            OldManKick1Right,
            OldManKick2Right,
            OldManJumpLeft,
            OldManJumpRight,
            OldManFrontJump,
            Tree,
            Trailer,
            FloorTile,
        ];

        let mut assets = Assets::default();
        for (i, frame) in frames.into_iter().enumerate() {
            let color = [i as u8 + 1, 0, 0, 255];
            let pixels = color.iter().copied().cycle().take(16 * 24 * 4).collect::<Vec<u8>>();
            assets.insert(frame, (16, 24, Rc::from(pixels)));
        }

        assets
    }

    fn assets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets")
    }

    fn pixel(sprite: &CachedSprite, x: usize, y: usize) -> &[u8] {
        let i = (x + y * sprite.0) * 4;
        &sprite.2[i..i + 4]
    }

    #[test]
    fn test_pcx() {
        let sprite = load_pcx(include_bytes!("../../assets/oldman-idle.pcx")).unwrap();

        assert_eq!(sprite.0, 16, "Width differs");
        assert_eq!(sprite.1, 24, "Height differs");
        assert_eq!(sprite.2.len(), 16 * 24 * 4, "Pixel count differs");

        // Background is transparent
        assert_eq!(pixel(&sprite, 0, 0), [0, 0, 0, 0]);
        // The eye is drawn with the outline color
        assert_eq!(pixel(&sprite, 9, 4), [34, 32, 52, 255]);
        // Skin
        assert_eq!(pixel(&sprite, 5, 4), [238, 195, 154, 255]);
    }

    #[test]
    fn test_rgb_pcx_is_opaque() {
        let mut pcx = Vec::new();
        let mut writer = pcx::WriterRgb::new(&mut pcx, (2, 1), (300, 300)).unwrap();
        writer.write_row(&[0, 0, 0, 10, 20, 30]).unwrap();
        writer.finish().unwrap();

        let sprite = load_pcx(&pcx).unwrap();

        assert_eq!((sprite.0, sprite.1), (2, 1));
        // Black is not transparent without a palette
        assert_eq!(sprite.2[..], [0, 0, 0, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn test_pcx_rejects_garbage() {
        assert!(load_pcx(b"definitely not a pcx file").is_err());
    }

    #[test]
    fn test_load_image_missing_file() {
        let err = load_image(Path::new("/nonexistent/oldman.pcx")).unwrap_err();

        assert!(matches!(err, Error::Io { .. }), "Unexpected error: {err:?}");
    }

    #[test]
    fn test_load_frames_in_order() {
        let frames = load_frames(&assets_dir(), &["tree.pcx", "floor-tile.pcx"]).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!((frames[0].0, frames[0].1), (32, 48));
        assert_eq!((frames[1].0, frames[1].1), (16, 16));
    }

    #[test]
    fn test_load_assets_mirrors_left_frames() {
        let assets = load_assets(&assets_dir()).unwrap();
        let right = assets.sprite(Frame::OldManIdleRight).unwrap();
        let left = assets.sprite(Frame::OldManIdleLeft).unwrap();

        assert_eq!(pixel(right, 9, 4), pixel(left, 6, 4));
        assert_eq!(pixel(left, 6, 4), [34, 32, 52, 255]);
    }

    #[test]
    fn test_missing_frame_is_an_error() {
        let assets = Assets::default();

        assert!(matches!(
            assets.sprite(Frame::Tree),
            Err(Error::MissingFrame(Frame::Tree))
        ));
    }
}
