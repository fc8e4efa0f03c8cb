use std::time::Instant;

use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::{ProbeRecord, ProbeSession};
use super::util::random_local_part;

/// Probes `mx_host` with a scripted `HELO`/`MAIL FROM`/`RCPT TO` sequence for
/// one decoy address, the real `target_email`, and — unless the adaptive
/// skip fires — a second decoy.
///
/// `target_domain` supplies the decoys' domain part; it is always the same
/// domain as `target_email`, kept separate here since the caller has already
/// split it out during normalization.
pub fn probe(
    mx_host: &str,
    target_email: &str,
    target_domain: &str,
    adaptive: bool,
    options: &ProbeOptions,
) -> ProbeSession {
    let mut session = match SmtpSession::connect(
        mx_host,
        options.port,
        options.connect_timeout,
        options.command_timeout,
    ) {
        Ok(session) => session,
        Err(_) => {
            return ProbeSession {
                connected: false,
                records: vec![ProbeRecord::connect_sentinel()],
            };
        }
    };

    // HELO/MAIL FROM failures are non-fatal: the probes that follow still
    // carry useful signal even against a server that rejected them.
    let _ = session.command(&format!("HELO {}", options.helo_domain));
    let _ = session.command(&format!("MAIL FROM:<{}>", options.mail_from));

    let mut records = Vec::with_capacity(3);

    let decoy1_address = format!("{}@{}", random_local_part(), target_domain);
    let decoy1 = rcpt_probe(&mut session, &decoy1_address);
    let decoy1_code = decoy1.code;
    let decoy1_time = decoy1.latency_ms;
    records.push(decoy1);

    std::thread::sleep(options.probe_pause);

    let real = rcpt_probe(&mut session, target_email);
    let real_code = real.code;
    let real_time = real.latency_ms;
    records.push(real);

    let skip_decoy2 = adaptive
        && matches!(real_code, Some(250 | 450 | 451 | 452))
        && match (real_time, decoy1_time) {
            (Some(real_t), Some(decoy1_t)) => (real_t - decoy1_t).abs() > 60.0,
            _ => false,
        };

    if !skip_decoy2 {
        std::thread::sleep(options.probe_pause);
        let decoy2_address = format!("{}@{}", random_local_part(), target_domain);
        records.push(rcpt_probe(&mut session, &decoy2_address));
    }

    let _ = session.command("QUIT");

    ProbeSession {
        connected: true,
        records,
    }
}

fn rcpt_probe(session: &mut SmtpSession, address: &str) -> ProbeRecord {
    let started = Instant::now();
    let reply = session.command(&format!("RCPT TO:<{address}>"));
    let elapsed = started.elapsed();

    ProbeRecord {
        address: address.to_string(),
        code: reply.map(|r| r.code),
        latency_ms: Some(round_to_two_decimals(elapsed.as_secs_f64() * 1000.0)),
    }
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_failure_yields_sentinel() {
        // Port 0 never accepts connections; exercises the failure path
        // without depending on network access.
        let options = ProbeOptions {
            connect_timeout: std::time::Duration::from_millis(50),
            command_timeout: std::time::Duration::from_millis(50),
            ..ProbeOptions::default()
        };
        let result = probe("127.0.0.1", "user@example.com", "example.com", true, &{
            let mut o = options;
            o.port = 1;
            o
        });
        assert!(!result.connected);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].address, "__connect__");
        assert!(result.records[0].code.is_none());
        assert!(result.records[0].latency_ms.is_none());
    }
}
