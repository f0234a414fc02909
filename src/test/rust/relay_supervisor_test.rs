use rtsp_rtmp_relay::{
    Backoff, BackoffPolicy, CommandBuilder, Endpoint, EndpointRole, MetricsReporter,
    ProcessLauncher, ReachabilityProbe, RelayConfig, RelayProfile, RelayState, Sleeper,
    SupervisorService, TcpProbe, DEFAULT_RTMP_PORT, DEFAULT_RTSP_PORT,
};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn test_parse_camera_url_with_colon_in_password() {
    let endpoint = Endpoint::parse(
        "rtsp://admin:pa:ss@10.0.0.5:554/Streaming/101",
        DEFAULT_RTSP_PORT,
    );
    assert_eq!(endpoint.host(), Some("10.0.0.5"));
    assert_eq!(endpoint.port(), 554);
}

#[test]
fn test_parse_ingest_url_without_port() {
    let endpoint = Endpoint::parse("rtmp://10.0.0.9/live", DEFAULT_RTMP_PORT);
    assert_eq!(endpoint.host(), Some("10.0.0.9"));
    assert_eq!(endpoint.port(), 1935);
}

#[test]
fn test_credential_colons_never_split_port() {
    for password in ["p:w", "a:b:c", ":", "::x::"] {
        let url = format!("rtsp://user:{}@cam.example:8554/stream", password);
        let endpoint = Endpoint::parse(&url, DEFAULT_RTSP_PORT);
        assert_eq!(endpoint.host(), Some("cam.example"), "url: {}", url);
        assert_eq!(endpoint.port(), 8554, "url: {}", url);
    }
}

#[test]
fn test_backoff_sequence_from_defaults() {
    let policy = BackoffPolicy::doubling(Duration::from_secs(5), Duration::from_secs(60)).unwrap();
    let mut backoff = Backoff::new(policy);

    let delays: Vec<u64> = (0..7).map(|_| backoff.next_delay().as_secs()).collect();
    assert_eq!(delays, vec![5, 10, 20, 40, 60, 60, 60]);
}

#[test]
fn test_relay_profiles_are_distinct() {
    let config = RelayConfig::new(
        "rtsp://10.0.0.5/stream".to_string(),
        "rtmp://10.0.0.9/live".to_string(),
    )
    .unwrap();

    let wallclock = CommandBuilder::build_args(&config.clone().with_profile(RelayProfile::Wallclock));
    let reconnect = CommandBuilder::build_args(&config.with_profile(RelayProfile::Reconnect));

    assert!(wallclock.contains(&"-use_wallclock_as_timestamps".to_string()));
    assert!(!wallclock.contains(&"-reconnect".to_string()));
    assert!(reconnect.contains(&"-reconnect".to_string()));
    assert!(!reconnect.contains(&"-use_wallclock_as_timestamps".to_string()));

    for args in [&wallclock, &reconnect] {
        let joined = args.join(" ");
        assert!(joined.contains("-rtsp_transport tcp"));
        assert!(joined.contains("-c:v copy -c:a aac -f flv rtmp://10.0.0.9/live"));
        assert!(joined.ends_with("-loglevel error"));
    }
}

#[test]
fn test_tcp_probe_against_local_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let probe = TcpProbe::new(Duration::from_secs(1)).unwrap();

    assert!(probe.probe(&Endpoint::new("127.0.0.1", port)));
    drop(listener);
    assert!(!probe.probe(&Endpoint::new("127.0.0.1", port)));
}

#[derive(Default)]
struct CountingMetrics {
    launches: AtomicUsize,
    exits: AtomicUsize,
    probe_failures: Mutex<Vec<EndpointRole>>,
}

impl MetricsReporter for CountingMetrics {
    fn report_state_change(&self, _state: &RelayState) {}

    fn report_probe_failure(&self, role: EndpointRole) {
        self.probe_failures.lock().unwrap().push(role);
    }

    fn report_relay_launch(&self) {
        self.launches.fetch_add(1, Ordering::SeqCst);
    }

    fn report_relay_exit(&self, _uptime_secs: f64) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }

    fn report_backoff(&self, _delay_secs: f64) {}
}

struct StopAfter {
    remaining: AtomicUsize,
    delays: Arc<Mutex<Vec<Duration>>>,
    running: Arc<AtomicBool>,
}

impl Sleeper for StopAfter {
    fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
        if self.remaining.fetch_sub(1, Ordering::SeqCst) <= 1 {
            self.running.store(false, Ordering::SeqCst);
        }
    }
}

fn supervisor(
    rtsp_url: String,
    rtmp_url: String,
    program: &str,
    sleeps: usize,
) -> (SupervisorService, Arc<CountingMetrics>, Arc<Mutex<Vec<Duration>>>) {
    let config = RelayConfig::new(rtsp_url, rtmp_url).unwrap();
    let policy = BackoffPolicy::doubling(Duration::from_secs(1), Duration::from_secs(4)).unwrap();
    let metrics = Arc::new(CountingMetrics::default());
    let delays = Arc::new(Mutex::new(Vec::new()));
    let running = Arc::new(AtomicBool::new(false));

    let service = SupervisorService::new(
        config,
        Box::new(TcpProbe::new(Duration::from_millis(500)).unwrap()),
        Box::new(ProcessLauncher::new(program)),
        policy,
        metrics.clone(),
    )
    .with_running_flag(running.clone())
    .with_sleeper(Box::new(StopAfter {
        remaining: AtomicUsize::new(sleeps),
        delays: delays.clone(),
        running,
    }));

    (service, metrics, delays)
}

#[cfg(unix)]
#[test]
fn test_supervisor_relaunches_real_process_with_growing_backoff() {
    let source = TcpListener::bind("127.0.0.1:0").unwrap();
    let destination = TcpListener::bind("127.0.0.1:0").unwrap();
    let rtsp_url = format!(
        "rtsp://admin:pa:ss@127.0.0.1:{}/Streaming/101",
        source.local_addr().unwrap().port()
    );
    let rtmp_url = format!("rtmp://127.0.0.1:{}/live", destination.local_addr().unwrap().port());

    // `true` exits immediately, standing in for a relay whose link dropped
    let (mut service, metrics, delays) = supervisor(rtsp_url, rtmp_url, "true", 3);
    service.run().unwrap();

    assert_eq!(metrics.launches.load(Ordering::SeqCst), 3);
    assert_eq!(metrics.exits.load(Ordering::SeqCst), 3);
    assert!(metrics.probe_failures.lock().unwrap().is_empty());
    assert_eq!(
        *delays.lock().unwrap(),
        vec![Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(4)]
    );
    assert_eq!(service.current_state(), RelayState::Stopped);
}

#[test]
fn test_supervisor_with_offline_camera_never_launches() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let rtsp_url = format!("rtsp://127.0.0.1:{}/stream", port);

    let (mut service, metrics, delays) =
        supervisor(rtsp_url, "rtmp://127.0.0.1/live".to_string(), "true", 2);
    service.run().unwrap();

    assert_eq!(metrics.launches.load(Ordering::SeqCst), 0);
    assert_eq!(
        *metrics.probe_failures.lock().unwrap(),
        vec![EndpointRole::Source, EndpointRole::Source]
    );
    assert_eq!(delays.lock().unwrap().len(), 2);
}

#[test]
fn test_malformed_source_url_drives_backoff_instead_of_failing() {
    let (mut service, metrics, delays) = supervisor(
        "not a url".to_string(),
        "rtmp://127.0.0.1/live".to_string(),
        "true",
        2,
    );
    assert!(service.run().is_ok());

    assert_eq!(metrics.launches.load(Ordering::SeqCst), 0);
    assert_eq!(
        *delays.lock().unwrap(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[cfg(unix)]
fn closed_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[cfg(unix)]
fn relay_binary() -> std::process::Command {
    let mut command = std::process::Command::new(env!("CARGO_BIN_EXE_rtsp-rtmp-relay"));
    command
        .env_remove("RTSP_URL")
        .env_remove("RTMP_URL")
        .env_remove("METRICS_PORT")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());
    command
}

#[cfg(unix)]
fn wait_with_deadline(
    child: &mut std::process::Child,
    deadline: Duration,
) -> Option<std::process::ExitStatus> {
    let started = std::time::Instant::now();
    while started.elapsed() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    None
}

#[cfg(unix)]
#[test]
fn test_sigterm_during_backoff_exits_zero_immediately() {
    use std::io::{BufRead, BufReader};
    use std::sync::mpsc;

    let port = closed_local_port();
    let mut child = relay_binary()
        .env("RTSP_URL", format!("rtsp://127.0.0.1:{}/stream", port))
        .env("RTMP_URL", format!("rtmp://127.0.0.1:{}/live/key", port))
        .env("RETRY_INITIAL", "5")
        .env("RETRY_MAX", "60")
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let (lines_tx, lines_rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(|line| line.ok()) {
            if lines_tx.send(line).is_err() {
                break;
            }
        }
    });

    // Wait until the loop has entered its first 5s backoff sleep
    let mut offline_seen = false;
    while let Ok(line) = lines_rx.recv_timeout(Duration::from_secs(10)) {
        if line.contains("Camera offline") {
            offline_seen = true;
            break;
        }
    }
    if !offline_seen {
        let _ = child.kill();
        panic!("relay never reported the camera offline");
    }

    let signalled_at = std::time::Instant::now();
    let kill = std::process::Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    let status = wait_with_deadline(&mut child, Duration::from_secs(3));
    let Some(status) = status else {
        let _ = child.kill();
        panic!("relay kept running after SIGTERM");
    };
    assert_eq!(status.code(), Some(0));
    assert!(signalled_at.elapsed() < Duration::from_secs(5));

    let stopped_logged = lines_rx
        .iter()
        .any(|line| line.contains("Service stopped by user"));
    assert!(stopped_logged);
}

#[cfg(unix)]
#[test]
fn test_missing_urls_exit_non_zero() {
    let mut child = relay_binary().spawn().unwrap();

    let status = wait_with_deadline(&mut child, Duration::from_secs(10));
    let Some(status) = status else {
        let _ = child.kill();
        panic!("relay started without RTSP_URL");
    };
    assert!(!status.success());
}

#[cfg(unix)]
#[test]
fn test_zero_retry_delay_exits_non_zero() {
    let mut child = relay_binary()
        .env("RTSP_URL", "rtsp://127.0.0.1:8554/stream")
        .env("RTMP_URL", "rtmp://127.0.0.1/live/key")
        .env("RETRY_INITIAL", "0")
        .spawn()
        .unwrap();

    let status = wait_with_deadline(&mut child, Duration::from_secs(10));
    let Some(status) = status else {
        let _ = child.kill();
        panic!("relay accepted a zero retry delay");
    };
    assert!(!status.success());
}
