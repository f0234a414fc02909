use crate::domain::value_objects::{RelayConfig, RelayProfile};

/// Default relay tool executable
pub const DEFAULT_RELAY_PROGRAM: &str = "ffmpeg";

pub struct CommandBuilder;

impl CommandBuilder {
    /// Build the relay tool argument vector for RTSP to RTMP relaying.
    /// Video is passed through untouched, audio re-encoded to AAC and the
    /// output muxed as FLV for the RTMP ingest.
    pub fn build_args(config: &RelayConfig) -> Vec<String> {
        let mut args: Vec<&str> = Vec::with_capacity(20);

        if config.profile() == RelayProfile::Reconnect {
            // Tool-level reconnect, independent of the supervisor's own retries
            args.extend([
                "-reconnect",
                "1",
                "-reconnect_streamed",
                "1",
                "-reconnect_delay_max",
                "5",
            ]);
        }

        args.extend(["-rtsp_transport", "tcp"]);

        if config.profile() == RelayProfile::Wallclock {
            args.extend(["-use_wallclock_as_timestamps", "1", "-fflags", "+genpts"]);
        }

        args.extend(["-i", config.rtsp_url()]);
        args.extend(["-c:v", "copy", "-c:a", "aac", "-f", "flv"]);
        args.push(config.rtmp_url());
        args.extend(["-loglevel", "error"]);

        args.into_iter().map(String::from).collect()
    }
}
