use std::io;

use crate::{
    effects::transitions::TransitionState,
    foundation::core::Canvas,
    foundation::error::StoryResult,
    foundation::math::Fnv1a64,
    render::tree::{Layer, VisualTree},
};

/// 128-bit fingerprint of what a frame looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFingerprint {
    /// First FNV lane.
    pub hi: u64,
    /// Second FNV lane, differently seeded.
    pub lo: u64,
}

struct FnvPair {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl io::Write for FnvPair {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.a.write_bytes(buf);
        self.b.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct VisualKey<'a> {
    canvas: Canvas,
    opacity: f64,
    transition: Option<&'a TransitionState>,
    layers: &'a [Layer],
}

/// Fingerprint the visible content of `tree`.
///
/// Frame index, timing metadata, audio and warnings are left out, so two frames that would draw
/// the same pixels share a fingerprint.
pub fn fingerprint_tree(tree: &VisualTree) -> StoryResult<FrameFingerprint> {
    let mut h = FnvPair {
        a: Fnv1a64::new_default(),
        b: Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
    };
    let key = VisualKey {
        canvas: tree.canvas,
        opacity: tree.opacity,
        transition: tree.transition.as_ref(),
        layers: &tree.layers,
    };
    serde_json::to_writer(&mut h, &key)?;
    for lane in [&mut h.a, &mut h.b] {
        lane.write_u64(tree.layers.len() as u64);
    }
    Ok(FrameFingerprint {
        hi: h.a.finish(),
        lo: h.b.finish(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
