use std::sync::OnceLock;

use regex::Regex;

use crate::results::AvatarOverride;

const DICEBEAR_BASE: &str = "https://api.dicebear.com/7.x";
const BANNER_BACKGROUND: &str = "0077b5";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Avatar,
    Thumbnail,
    Header,
}

impl ImageKind {
    pub fn size(self) -> u32 {
        match self {
            ImageKind::Avatar => 200,
            ImageKind::Thumbnail => 150,
            ImageKind::Header => 1200,
        }
    }
}

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").expect("static regex"))
}

/// Strips everything but ASCII letters and digits; empty seeds become
/// "default".
pub fn normalize_seed(seed: &str) -> String {
    let cleaned = non_alnum().replace_all(seed, "");
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned.into_owned()
    }
}

pub fn ai_face_url(seed: &str, size: u32) -> String {
    format!(
        "{DICEBEAR_BASE}/personas/png?seed={}&size={size}",
        normalize_seed(seed)
    )
}

pub fn ai_banner_url(seed: &str, width: u32) -> String {
    format!(
        "{DICEBEAR_BASE}/shapes/png?seed={}&size={width}&backgroundColor={BANNER_BACKGROUND}",
        normalize_seed(seed)
    )
}

pub fn fake_image_url(result_id: &str, kind: ImageKind, overrides: &[AvatarOverride]) -> String {
    if kind != ImageKind::Header {
        if let Some(o) = overrides.iter().find(|o| o.matches(result_id)) {
            return o.url.clone();
        }
    }
    match kind {
        ImageKind::Header => ai_banner_url(result_id, kind.size()),
        ImageKind::Avatar | ImageKind::Thumbnail => ai_face_url(result_id, kind.size()),
    }
}

pub fn video_thumbnail_url(video_id: &str) -> String {
    ai_banner_url(video_id, 400)
}
