//! Test fixtures and constants.

use age::secrecy::ExposeSecret;
use age::x25519;

/// A small secret manifest.
pub const SAMPLE_SECRET: &str = "apiVersion: v1\nkind: Secret\nmetadata:\n  name: db\nstringData:\n  password: hunter2\n";

/// Fresh age-keygen style output and its public key.
pub fn age_key() -> (String, String) {
    let identity = x25519::Identity::generate();
    let public = identity.to_public().to_string();
    let text = format!(
        "# created: 2024-05-01T12:00:00Z\n# public key: {}\n{}\n",
        public,
        identity.to_string().expose_secret()
    );
    (text, public)
}

/// Write executable fake `age-keygen` and `sops` scripts into `bin`.
///
/// The fake sops prefixes every plaintext line with `#| ` and appends a
/// `sops:` block; decryption strips them again. Both refuse to run without
/// `SOPS_AGE_KEY` in the environment.
#[cfg(unix)]
pub fn install_fake_tools(bin: &std::path::Path, key_text: &str) {
    let keygen = format!("#!/bin/sh\ncat <<'AGEKEY'\n{}AGEKEY\n", key_text);
    let sops = r#"#!/bin/sh
[ -n "$SOPS_AGE_KEY" ] || { echo "no age key in environment" >&2; exit 1; }
case "$1" in
  --encrypt)
    { sed 's/^/#| /' "$4"; printf 'sops:\n    age: fake\n'; } > "$3"
    ;;
  --decrypt)
    grep '^#| ' "$2" | sed 's/^#| //'
    ;;
  *)
    echo "unsupported: $1" >&2
    exit 2
    ;;
esac
"#;

    install_script(bin, "age-keygen", &keygen);
    install_script(bin, "sops", sops);
}

/// Write (or replace) an executable script named `name` in `bin`.
#[cfg(unix)]
pub fn install_script(bin: &std::path::Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = bin.join(name);
    std::fs::write(&path, body).expect("failed to write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod fake tool");
}

/// A tool that prints `message` to stderr and exits with `code`.
pub fn failing_script(message: &str, code: i32) -> String {
    format!("#!/bin/sh\necho '{}' >&2\nexit {}\n", message, code)
}
