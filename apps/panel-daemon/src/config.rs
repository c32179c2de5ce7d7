use assistant::{EdgeTtsConfig, OpenAiCompatConfig, DEFAULT_MAX_HISTORY, DEFAULT_VOICE};
use cast_control::ControllerConfig;
use clap::Parser;
use memory_client::MemoryConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "panel-daemon")]
#[command(about = "Web control panel and voice assistant for a cast speaker")]
pub struct Args {
    /// Address to serve the panel on
    #[arg(long, env = "PANEL_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Cast device name
    #[arg(long, env = "CAST_DEVICE", default_value = "Familienzimmer")]
    pub device: String,

    /// Controller executable
    #[arg(long, env = "CATT_BIN", default_value = "catt")]
    pub catt: String,

    /// YAML file with `radio:` and `youtube:` catalogs
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory for synthesized replies
    #[arg(long, default_value = "audio")]
    pub audio_dir: PathBuf,

    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub llm_base_url: String,

    #[arg(long, default_value = "gpt-4o-mini")]
    pub llm_model: String,

    #[arg(long, env = "MEMORY_API_URL")]
    pub memory_url: Option<String>,

    #[arg(long, env = "MEMORY_API_KEY", hide_env_values = true)]
    pub memory_key: Option<String>,

    #[arg(long, default_value = DEFAULT_VOICE)]
    pub tts_voice: String,

    /// Conversation turns replayed to the model
    #[arg(long, default_value_t = DEFAULT_MAX_HISTORY)]
    pub max_history: usize,
}

impl Args {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            program: self.catt.clone(),
            device: self.device.clone(),
            ..ControllerConfig::default()
        }
    }

    pub fn llm_config(&self) -> OpenAiCompatConfig {
        OpenAiCompatConfig {
            base_url: self.llm_base_url.clone(),
            api_key: self.llm_api_key.clone(),
            model: self.llm_model.clone(),
            ..OpenAiCompatConfig::default()
        }
    }

    pub fn memory_config(&self) -> Option<MemoryConfig> {
        MemoryConfig::from_parts(self.memory_url.clone(), self.memory_key.clone())
    }

    pub fn tts_config(&self) -> EdgeTtsConfig {
        EdgeTtsConfig {
            voice: self.tts_voice.clone(),
            ..EdgeTtsConfig::default()
        }
    }
}
