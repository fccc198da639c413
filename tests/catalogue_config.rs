// tests/catalogue_config.rs
// Catalogue resolution order: env path → config/catalogue.toml → built-in.

use std::{env, fs};

use meme_news_aggregator::catalogue::{Catalogue, Category, ENV_CATALOGUE_CONFIG_PATH};

#[serial_test::serial]
#[test]
fn env_path_takes_precedence() {
    let path = env::temp_dir().join("catalogue_config_test_override.toml");
    fs::write(
        &path,
        r#"
[categories.politics]
news_sources = ["override-source"]
meme_sources = ["override-memes"]
keywords = ["override"]
"#,
    )
    .expect("write override file");

    env::set_var(ENV_CATALOGUE_CONFIG_PATH, &path);
    let cat = Catalogue::from_env().expect("load from env path");
    env::remove_var(ENV_CATALOGUE_CONFIG_PATH);
    let _ = fs::remove_file(&path);

    assert_eq!(cat.news_sources(Category::Politics), ["override-source"]);
    assert!(cat.news_sources(Category::Sports).is_empty());
}

#[serial_test::serial]
#[test]
fn env_path_to_missing_file_is_an_error() {
    env::set_var(
        ENV_CATALOGUE_CONFIG_PATH,
        env::temp_dir().join("definitely_not_here.toml"),
    );
    let res = Catalogue::from_env();
    env::remove_var(ENV_CATALOGUE_CONFIG_PATH);
    assert!(res.is_err());
}

#[serial_test::serial]
#[test]
fn shipped_config_matches_the_builtin_table() {
    // without the env var the repo's config/catalogue.toml is picked up;
    // it must agree with the compiled-in table the tests pin
    env::remove_var(ENV_CATALOGUE_CONFIG_PATH);
    let from_disk = Catalogue::from_env().expect("load shipped config");
    let builtin = Catalogue::builtin();
    for c in Category::ALL {
        assert_eq!(from_disk.news_sources(c), builtin.news_sources(c), "{c}");
        assert_eq!(from_disk.meme_sources(c), builtin.meme_sources(c), "{c}");
        assert_eq!(from_disk.keywords(c), builtin.keywords(c), "{c}");
    }
}
