use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the script generator
///
/// Persona data (channel profile, target audience, desire catalog, title
/// vocabulary) is immutable data passed into the generators and the styling
/// pipeline, so an alternate persona is a config file away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Channel identity used by the styling pipeline
    pub channel: ChannelProfile,

    /// Viewer demographic used by audience targeting
    pub audience: TargetAudience,

    /// Essential-desire catalog for the structured-prompt format
    pub desires: Vec<DesireGroup>,

    /// Title pattern templates and slot vocabularies
    pub title: TitleVocabulary,

    /// Segment prompts for the structured-prompt format
    pub structured_prompts: Vec<String>,

    /// Transcript language preferences
    pub languages: LanguageConfig,

    /// Translation collaborator settings
    pub translator: TranslatorConfig,

    /// Optional LLM enrichment settings
    pub llm: LlmConfig,
}

/// Channel theme and branding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// One-line channel concept, rendered as the styled header
    pub concept: String,

    /// Genres covered by the channel
    pub genres: Vec<String>,

    /// Named content types; a matching name in a document body gets the
    /// type's label block prepended
    pub content_types: Vec<ContentType>,

    /// Branding line appended as the footer of every styled document
    pub branding_atmosphere: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    pub name: String,
    pub description: String,
}

/// Viewer demographic profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetAudience {
    /// Main age bracket, rendered as the audience label line
    pub age_group_main: String,

    /// Core age bracket within the main one
    pub age_group_core: String,

    /// Short description of the demographic
    pub description: String,
}

/// One group of viewer desires with its concrete elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesireGroup {
    pub name: String,
    pub elements: Vec<String>,
}

/// Pattern templates and slot vocabularies for title generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleVocabulary {
    /// Pattern templates with {emotion}, {keyword}, {hook} and {number} slots
    pub patterns: Vec<String>,
    pub keywords: Vec<String>,
    pub emotions: Vec<String>,
    pub numbers: Vec<String>,
    pub hooks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language tried first when fetching a transcript
    pub primary: String,

    /// Single fallback language when the primary has no captions
    pub fallback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translation API endpoint; None disables translation
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat completion endpoint; None disables LLM enrichment
    pub endpoint: Option<String>,

    /// Model to use
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from file, probing the usual locations
    pub fn load() -> Result<Self> {
        let config_paths = [
            "scriptgen.toml",
            "config/scriptgen.toml",
            "~/.config/yt-scriptgen/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(lang) = std::env::var("SCRIPTGEN_PRIMARY_LANG") {
            config.languages.primary = lang;
        }

        if let Ok(lang) = std::env::var("SCRIPTGEN_FALLBACK_LANG") {
            config.languages.fallback = lang;
        }

        if let Ok(endpoint) = std::env::var("SCRIPTGEN_TRANSLATOR_ENDPOINT") {
            config.translator.endpoint = Some(endpoint);
        }

        if let Ok(endpoint) = std::env::var("SCRIPTGEN_LLM_ENDPOINT") {
            config.llm.endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.title.patterns.is_empty() {
            return Err(anyhow!("title.patterns must not be empty"));
        }

        for (name, vocab) in [
            ("title.keywords", &self.title.keywords),
            ("title.emotions", &self.title.emotions),
            ("title.numbers", &self.title.numbers),
            ("title.hooks", &self.title.hooks),
        ] {
            if vocab.is_empty() {
                return Err(anyhow!("{} must not be empty", name));
            }
        }

        if self.structured_prompts.is_empty() {
            return Err(anyhow!("structured_prompts must not be empty"));
        }

        if self.languages.primary.is_empty() || self.languages.fallback.is_empty() {
            return Err(anyhow!("both primary and fallback languages are required"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: ChannelProfile {
                concept: "知的好奇心を刺激するエンタメ".to_string(),
                genres: vec![
                    "都市伝説".to_string(),
                    "予言".to_string(),
                    "雑学".to_string(),
                    "スピリチュアル".to_string(),
                    "怪談".to_string(),
                ],
                content_types: vec![
                    ContentType {
                        name: "未来予測・予言".to_string(),
                        description: "近い未来に起こる可能性のある出来事や陰謀論を深掘り"
                            .to_string(),
                    },
                    ContentType {
                        name: "歴史・スピリチュアル".to_string(),
                        description: "過去の出来事とスピリチュアルな要素を絡めた解説".to_string(),
                    },
                    ContentType {
                        name: "考察系都市伝説".to_string(),
                        description: "論理的な裏付けと共に都市伝説を検証".to_string(),
                    },
                    ContentType {
                        name: "怪談".to_string(),
                        description: "日本や海外の怖い話、体験談の紹介".to_string(),
                    },
                ],
                branding_atmosphere: "落ち着いたナレーション、論理的な考察スタイル".to_string(),
            },
            audience: TargetAudience {
                age_group_main: "35～54歳".to_string(),
                age_group_core: "45～54歳".to_string(),
                description: "社会的関心が強い層".to_string(),
            },
            desires: vec![
                DesireGroup {
                    name: "好奇心と探求心".to_string(),
                    elements: vec![
                        "未来の予測と社会情勢".to_string(),
                        "ロジカルな都市伝説の分析".to_string(),
                        "歴史とスピリチュアルの融合".to_string(),
                    ],
                },
                DesireGroup {
                    name: "社会的つながり".to_string(),
                    elements: vec![
                        "家族や友人との会話のネタ".to_string(),
                        "じっくりとした視聴体験".to_string(),
                        "コミュニティでの共有".to_string(),
                    ],
                },
                DesireGroup {
                    name: "恐怖と不安の解消".to_string(),
                    elements: vec![
                        "未来への準備と対策".to_string(),
                        "スリリングな体験による発散".to_string(),
                        "不確実性への対処".to_string(),
                    ],
                },
                DesireGroup {
                    name: "エンターテインメント要素".to_string(),
                    elements: vec![
                        "6分以上の深い考察".to_string(),
                        "論理的な構成と分析".to_string(),
                        "落ち着いた解説スタイル".to_string(),
                    ],
                },
            ],
            title: TitleVocabulary {
                patterns: vec![
                    "【{emotion}】{keyword}が{hook}！{number}真実".to_string(),
                    "【緊急】{keyword}で{hook}...{emotion}の{number}証拠".to_string(),
                    "{emotion}！{keyword}の{hook}...{number}真実が暴露".to_string(),
                    "【{number}】{keyword}の{hook}！{emotion}の展開に".to_string(),
                    "{keyword}【{emotion}】{hook}の{number}真実".to_string(),
                ],
                keywords: vec![
                    "都市伝説".to_string(),
                    "予言".to_string(),
                    "未来".to_string(),
                    "スピリチュアル".to_string(),
                    "陰謀論".to_string(),
                    "歴史的真実".to_string(),
                    "謎".to_string(),
                    "驚愕".to_string(),
                ],
                emotions: vec![
                    "衝撃".to_string(),
                    "驚き".to_string(),
                    "恐怖".to_string(),
                    "戦慄".to_string(),
                    "緊急".to_string(),
                    "緊迫".to_string(),
                    "注目".to_string(),
                ],
                numbers: vec![
                    "7つの".to_string(),
                    "3つの".to_string(),
                    "5つの".to_string(),
                    "唯一の".to_string(),
                    "初めての".to_string(),
                ],
                hooks: vec![
                    "ついに判明".to_string(),
                    "誰も知らない".to_string(),
                    "暴露".to_string(),
                    "緊急警告".to_string(),
                    "極秘情報".to_string(),
                ],
            },
            structured_prompts: vec![
                "目的：視聴者に価値を提供し、エンゲージメントを高める".to_string(),
                "フック：視聴者の興味を引く導入".to_string(),
                "問題提起：視聴者が抱える課題や悩み".to_string(),
                "解決策：具体的な方法や手順".to_string(),
                "具体例：実践的な例示や事例".to_string(),
                "アクション：視聴者が取るべき次のステップ".to_string(),
                "まとめ：重要ポイントの復習".to_string(),
            ],
            languages: LanguageConfig {
                primary: "ja".to_string(),
                fallback: "en".to_string(),
            },
            translator: TranslatorConfig {
                endpoint: None,
                timeout_seconds: 30,
            },
            llm: LlmConfig {
                endpoint: None,
                model: "local-model".to_string(),
                max_tokens: 4096,
                temperature: 0.1,
                timeout_seconds: 120,
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_languages(mut self, primary: &str, fallback: &str) -> Self {
        self.config.languages.primary = primary.to_string();
        self.config.languages.fallback = fallback.to_string();
        self
    }

    pub fn with_translator_endpoint(mut self, endpoint: String) -> Self {
        self.config.translator.endpoint = Some(endpoint);
        self
    }

    pub fn with_llm_endpoint(mut self, endpoint: String) -> Self {
        self.config.llm.endpoint = Some(endpoint);
        self
    }

    pub fn with_channel_concept(mut self, concept: String) -> Self {
        self.config.channel.concept = concept;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.languages.primary, "ja");
        assert_eq!(config.languages.fallback, "en");
        assert_eq!(config.title.patterns.len(), 5);
        assert_eq!(config.structured_prompts.len(), 7);
        assert_eq!(config.desires.len(), 4);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut broken = Config::default();
        broken.title.patterns.clear();
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_languages("en", "ja")
            .with_translator_endpoint("http://localhost:5000/translate".to_string())
            .build();

        assert_eq!(config.languages.primary, "en");
        assert_eq!(
            config.translator.endpoint.as_deref(),
            Some("http://localhost:5000/translate")
        );
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.channel.concept, config.channel.concept);
        assert_eq!(parsed.title.hooks, config.title.hooks);
    }
}
