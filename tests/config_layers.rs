use envresolver::config::{load_config, ConfigError, Target};
use envresolver::resolver::EnvironmentResolver;
use figment::Jail;

#[test]
fn file_then_env_override_builtin_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.yaml",
            r#"
target: test
environments:
  qa:
    site_url: "https://qa-from-file.example.com"
    auth0:
      backend: "https://api-from-file.qa.example.com"
"#,
        )?;
        jail.set_env("ENVRESOLVER_TARGET", "qa");
        jail.set_env(
            "ENVRESOLVER_ENVIRONMENTS__QA__SITE_URL",
            "https://qa-from-env.example.com",
        );

        let config = load_config("config.yaml").expect("config should load");
        assert_eq!(config.target, Some(Target::Qa));

        let qa = &config.environments[&Target::Qa];
        assert_eq!(qa.site_url, "https://qa-from-env.example.com");
        assert_eq!(qa.auth0.backend, "https://api-from-file.qa.example.com");
        assert_eq!(qa.auth0.domain, "qa-example.us.auth0.com");
        Ok(())
    });
}

#[test]
fn missing_file_uses_builtin_values() {
    Jail::expect_with(|jail| {
        jail.set_env("ENVRESOLVER_TARGET", "production");

        let config = load_config("does-not-exist.yaml").expect("config should load");
        let resolver = EnvironmentResolver::from_config(&config).expect("should resolve");
        assert_eq!(resolver.target(), Target::Production);
        assert!(resolver.is_production());
        assert_eq!(resolver.settings().site_url, "https://example.com");
        Ok(())
    });
}

#[test]
fn startup_fails_without_a_target() {
    Jail::expect_with(|_jail| {
        let config = load_config("config.yaml").expect("config should load");
        assert!(matches!(
            EnvironmentResolver::from_config(&config),
            Err(ConfigError::MissingTarget)
        ));
        Ok(())
    });
}

#[test]
fn startup_fails_on_malformed_urls() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.yaml",
            r#"
target: test
environments:
  test:
    site_url: "test.example.com"
"#,
        )?;

        let config = load_config("config.yaml").expect("config should load");
        match EnvironmentResolver::from_config(&config) {
            Err(ConfigError::Invalid { target, problems }) => {
                assert_eq!(target, Target::Test);
                assert_eq!(problems.len(), 1);
                assert!(problems[0].starts_with("site_url"));
            }
            other => panic!("expected Invalid, got {:?}", other.map(|r| r.target())),
        }
        Ok(())
    });
}

#[test]
fn unknown_target_in_env_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.set_env("ENVRESOLVER_TARGET", "staging");
        assert!(matches!(
            load_config("config.yaml"),
            Err(ConfigError::Load(_))
        ));
        Ok(())
    });
}

#[test]
fn numeric_env_overrides_keep_their_digits() {
    Jail::expect_with(|jail| {
        jail.set_env("ENVRESOLVER_TARGET", "qa");
        jail.set_env("ENVRESOLVER_ENVIRONMENTS__QA__AUTH0__CLIENT_ID", "123456");
        jail.set_env("ENVRESOLVER_ENVIRONMENTS__QA__AUTH0__AUDIENCE", "42");

        let config = load_config("config.yaml").expect("config should load");
        let resolver = EnvironmentResolver::from_config(&config).expect("should resolve");
        assert_eq!(resolver.settings().auth0.client_id, "123456");
        assert_eq!(resolver.settings().auth0.audience, "42");
        Ok(())
    });
}
