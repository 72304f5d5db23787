//! Argument assembly for bastion-proxied `ssh` sessions.
//!
//! Pure function of its inputs: the same target, bastion, key path and
//! command always produce the same argument list.

use std::path::Path;

/// Login user on the bastion host.
pub const BASTION_USER: &str = "hopper";

/// Login user on container instances.
pub const INSTANCE_USER: &str = "ec2-user";

/// Keep-alive probe interval in seconds.
pub const SERVER_ALIVE_INTERVAL: u32 = 60;

/// Missed probes tolerated before the session drops (720 × 60s = 12h).
pub const SERVER_ALIVE_COUNT_MAX: u32 = 720;

/// Build the argument list for the external `ssh` program.
///
/// Host-key checking is disabled for both hops. The certificate is not referenced here: ssh
/// picks up `<key>-cert.pub` next to the identity file on its own.
#[must_use]
pub fn ssh_args(ip: &str, bastion_ip: &str, private_key: &Path, command: &str) -> Vec<String> {
    let key = private_key.display();
    vec![
        "-t".to_string(),
        "-t".to_string(),
        "-oStrictHostKeyChecking=no".to_string(),
        "-oLogLevel=QUIET".to_string(),
        "-oUserKnownHostsFile=/dev/null".to_string(),
        format!("-oServerAliveInterval={SERVER_ALIVE_INTERVAL}"),
        format!("-oServerAliveCountMax={SERVER_ALIVE_COUNT_MAX}"),
        format!("-oProxyCommand=ssh -W %h:%p -i {key} {BASTION_USER}@{bastion_ip}"),
        "-i".to_string(),
        key.to_string(),
        format!("{INSTANCE_USER}@{ip}"),
        command.to_string(),
    ]
}

/// Arguments for `ssh-keygen` creating the ECDSA key pair at `private_key`.
/// The public half lands next to it with a `.pub` suffix.
#[must_use]
pub fn keygen_args(private_key: &Path) -> Vec<String> {
    vec![
        "-t".to_string(),
        "ecdsa".to_string(),
        "-b".to_string(),
        "521".to_string(),
        "-f".to_string(),
        private_key.display().to_string(),
        "-C".to_string(),
        String::new(),
    ]
}

/// Strip the trailing newline, and any spaces before it, from a public key
/// file's contents.
#[must_use]
pub fn trim_public_key(raw: &str) -> &str {
    raw.strip_suffix('\n')
        .map_or(raw, |line| line.trim_end_matches(' '))
}
