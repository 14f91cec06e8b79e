/// Skip a test if AWS credentials or a test key are not configured.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() && std::env::var("AWS_PROFILE").is_err() {
            eprintln!("SKIPPED: no AWS credentials in environment");
            return;
        }
        if std::env::var("SECRETSCTL_TEST_KMS_KEY").is_err() {
            eprintln!("SKIPPED: SECRETSCTL_TEST_KMS_KEY not set (set to an AWS KMS key ARN)");
            return;
        }
    };
}
