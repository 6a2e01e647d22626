//! Data-usage preferences: data saver, upload quality, auto-download rules and
//! the media classification they are expressed in.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Audio,
    Video,
    Document,
}

impl MediaType {
    pub const ALL: [MediaType; 4] =
        [MediaType::Photo, MediaType::Audio, MediaType::Video, MediaType::Document];

    pub fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "photo" | "photos" => Some(MediaType::Photo),
            "audio" => Some(MediaType::Audio),
            "video" | "videos" => Some(MediaType::Video),
            "document" | "documents" => Some(MediaType::Document),
            _ => None,
        }
    }

    /// Classify a file by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" | "heif" | "bmp" | "tiff" => {
                Some(MediaType::Photo)
            }
            "mp3" | "m4a" | "aac" | "ogg" | "opus" | "wav" | "flac" | "amr" => {
                Some(MediaType::Audio)
            }
            "mp4" | "mkv" | "mov" | "webm" | "avi" | "3gp" | "m4v" => Some(MediaType::Video),
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "odt" | "rtf"
            | "csv" | "zip" => Some(MediaType::Document),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Audio => "audio",
            MediaType::Video => "video",
            MediaType::Document => "document",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MediaType::Photo => "Photo",
            MediaType::Audio => "Audio",
            MediaType::Video => "Video",
            MediaType::Document => "Document",
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::from_name(s).ok_or_else(|| format!("Unknown media type '{s}'"))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaUploadQuality {
    #[default]
    Standard,
    Hd,
}

impl MediaUploadQuality {
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaUploadQuality::Standard => "Standard Quality",
            MediaUploadQuality::Hd => "HD Quality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MediaUploadQuality::Standard => {
                "Standard quality files are smaller and use less data."
            }
            MediaUploadQuality::Hd => {
                "HD quality files are clearer but use more data and take longer to send."
            }
        }
    }
}

impl FromStr for MediaUploadQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(MediaUploadQuality::Standard),
            "hd" => Ok(MediaUploadQuality::Hd),
            _ => Err(format!("Unknown upload quality '{s}' (expected standard or hd)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    Mobile,
    Wifi,
    Roaming,
}

impl NetworkType {
    pub const ALL: [NetworkType; 3] = [NetworkType::Mobile, NetworkType::Wifi, NetworkType::Roaming];

    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkType::Mobile => "Mobile data",
            NetworkType::Wifi => "Wi-Fi",
            NetworkType::Roaming => "Roaming",
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" | "mobile_data" | "cellular" => Ok(NetworkType::Mobile),
            "wifi" | "wi-fi" => Ok(NetworkType::Wifi),
            "roaming" => Ok(NetworkType::Roaming),
            _ => Err(format!("Unknown network type '{s}' (expected mobile, wifi or roaming)")),
        }
    }
}

/// Media types that download automatically on each kind of network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoDownloadRules {
    #[serde(default = "default_mobile_data")]
    pub mobile_data: BTreeSet<MediaType>,
    #[serde(default = "default_wifi")]
    pub wifi: BTreeSet<MediaType>,
    #[serde(default)]
    pub roaming: BTreeSet<MediaType>,
}

impl Default for AutoDownloadRules {
    fn default() -> Self {
        AutoDownloadRules {
            mobile_data: default_mobile_data(),
            wifi: default_wifi(),
            roaming: BTreeSet::new(),
        }
    }
}

impl AutoDownloadRules {
    pub fn rule(&self, network: NetworkType) -> &BTreeSet<MediaType> {
        match network {
            NetworkType::Mobile => &self.mobile_data,
            NetworkType::Wifi => &self.wifi,
            NetworkType::Roaming => &self.roaming,
        }
    }

    pub fn set_rule(&mut self, network: NetworkType, media: BTreeSet<MediaType>) {
        match network {
            NetworkType::Mobile => self.mobile_data = media,
            NetworkType::Wifi => self.wifi = media,
            NetworkType::Roaming => self.roaming = media,
        }
    }

    pub fn allows(&self, network: NetworkType, media: MediaType) -> bool {
        self.rule(network).contains(&media)
    }
}

/// Parse `NETWORK=TYPE[,TYPE...]`; `none` clears the rule and `all` selects every type.
pub fn parse_auto_download_rule(value: &str) -> Result<(NetworkType, BTreeSet<MediaType>), String> {
    let (network, types) = value
        .split_once('=')
        .ok_or_else(|| format!("Expected NETWORK=TYPES, got '{value}'"))?;
    let network: NetworkType = network.trim().parse()?;

    let types = types.trim();
    let media = match types.to_ascii_lowercase().as_str() {
        "none" | "" => BTreeSet::new(),
        "all" => MediaType::ALL.into_iter().collect(),
        _ => types
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<MediaType>)
            .collect::<Result<BTreeSet<MediaType>, String>>()?,
    };
    Ok((network, media))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// Reduce image quality and disable video autoplay.
    #[serde(default)]
    pub data_saver: bool,

    #[serde(default)]
    pub use_less_data_calls: bool,

    #[serde(default)]
    pub media_upload_quality: MediaUploadQuality,

    #[serde(default)]
    pub auto_download: AutoDownloadRules,
}

pub fn describe_media(media: &BTreeSet<MediaType>) -> String {
    if media.is_empty() {
        "No media".to_string()
    } else {
        media.iter().map(MediaType::display_name).collect::<Vec<_>>().join(", ")
    }
}

fn default_mobile_data() -> BTreeSet<MediaType> {
    BTreeSet::from([MediaType::Photo])
}

fn default_wifi() -> BTreeSet<MediaType> {
    MediaType::ALL.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(MediaType::from_path(Path::new("a/Clip.MP4")), Some(MediaType::Video));
        assert_eq!(MediaType::from_path(Path::new("photo.jpeg")), Some(MediaType::Photo));
        assert_eq!(MediaType::from_path(Path::new("voice.opus")), Some(MediaType::Audio));
        assert_eq!(MediaType::from_path(Path::new("deck.pdf")), Some(MediaType::Document));
        assert_eq!(MediaType::from_path(Path::new("blob.bin")), None);
        assert_eq!(MediaType::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn default_rules_match_network_cost() {
        let rules = AutoDownloadRules::default();
        assert!(rules.allows(NetworkType::Mobile, MediaType::Photo));
        assert!(!rules.allows(NetworkType::Mobile, MediaType::Video));
        assert!(MediaType::ALL.iter().all(|media| rules.allows(NetworkType::Wifi, *media)));
        assert!(rules.rule(NetworkType::Roaming).is_empty());
    }

    #[test]
    fn parses_auto_download_rules() {
        let (network, media) = parse_auto_download_rule("mobile=photo, audio").unwrap();
        assert_eq!(network, NetworkType::Mobile);
        assert_eq!(media, BTreeSet::from([MediaType::Photo, MediaType::Audio]));

        let (network, media) = parse_auto_download_rule("roaming=all").unwrap();
        assert_eq!(network, NetworkType::Roaming);
        assert_eq!(media.len(), 4);

        let (_, media) = parse_auto_download_rule("wifi=none").unwrap();
        assert!(media.is_empty());

        assert!(parse_auto_download_rule("wifi").is_err());
        assert!(parse_auto_download_rule("satellite=photo").is_err());
        assert!(parse_auto_download_rule("wifi=hologram").is_err());
    }

    #[test]
    fn upload_quality_parses_and_describes() {
        assert_eq!("HD".parse::<MediaUploadQuality>().unwrap(), MediaUploadQuality::Hd);
        assert_eq!(MediaUploadQuality::default().display_name(), "Standard Quality");
        assert!("ultra".parse::<MediaUploadQuality>().is_err());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = DataSettings { data_saver: true, ..DataSettings::default() };
        settings.auto_download.set_rule(NetworkType::Roaming, BTreeSet::from([MediaType::Audio]));

        let encoded = toml::to_string(&settings).unwrap();
        assert!(encoded.contains("roaming = [\"audio\"]"));
        let decoded: DataSettings = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, settings);
    }
}
