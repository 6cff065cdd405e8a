use crate::config::RdioScannerConfig;

/// Fixed call metadata attached to every upload.
///
/// Everything here comes from configuration; between clips only the
/// timestamp and the audio file itself vary.
#[derive(Debug, Clone)]
pub struct UploadMetadata {
    pub api_key: String,
    pub frequency: u64,
    pub source: u32,
    pub system: u32,
    pub system_label: String,
    pub talkgroup: u32,
    pub talkgroup_group: String,
    pub talkgroup_label: String,
    pub talkgroup_tag: String,
}

impl UploadMetadata {
    pub fn from_config(cfg: &RdioScannerConfig) -> Self {
        Self {
            api_key: cfg.api_key.clone(),
            frequency: cfg.frequency,
            source: cfg.source,
            system: cfg.system,
            system_label: cfg.system_label.clone(),
            talkgroup: cfg.talkgroup,
            talkgroup_group: cfg.talkgroup_group.clone(),
            talkgroup_label: cfg.talkgroup_label.clone(),
            talkgroup_tag: cfg.talkgroup_tag.clone(),
        }
    }

    /// The constant form fields, in the wire naming the endpoint expects.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frequency", self.frequency.to_string()),
            ("key", self.api_key.clone()),
            ("source", self.source.to_string()),
            ("system", self.system.to_string()),
            ("systemLabel", self.system_label.clone()),
            ("talkgroup", self.talkgroup.to_string()),
            ("talkgroupGroup", self.talkgroup_group.clone()),
            ("talkgroupLabel", self.talkgroup_label.clone()),
            ("talkgroupTag", self.talkgroup_tag.clone()),
        ]
    }
}
