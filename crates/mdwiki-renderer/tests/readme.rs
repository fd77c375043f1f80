//! End-to-end conversion of a plugin README.

use mdwiki_renderer::{
    Document, ParseOptions, SourceOptions, WikiRenderer, github_raw_root, parse, render_source,
};
use pretty_assertions::assert_eq;

const README: &str = r#"# Email Extension Plugin

This plugin extends the [mailer](https://plugins.jenkins.io/mailer) with
more control over *when* and **how** mail is sent.

![Configuration](docs/images/config.png "Global configuration")

## Features

- Triggers
  - Failure
  - Success
- Content tokens
1. Install
2. Configure

## Usage

```java
public class Hello {}
```

See the [wiki][docs] or the [changelog][].

> Requires Jenkins 2.0.

---

| Token | Meaning |
|-------|---------|
| `$X`  | x       |

[docs]: docs/README.md
"#;

const EXPECTED: &str = "h1. Email Extension Plugin

This plugin extends the [mailer|https://plugins.jenkins.io/mailer] with
more control over _when_ and *how* mail is sent.

!https://raw.githubusercontent.com/jenkinsci/email-ext-plugin/master/docs/images/config.png|alt=Global configuration!


h2. Features

* Triggers
** Failure
** Success
* Content tokens
# Install
# Configure

h2. Usage
{code:java}public class Hello {}
{code}
See the [wiki|https://raw.githubusercontent.com/jenkinsci/email-ext-plugin/master/docs/README.md] or the [changelog][].

bq. Requires Jenkins 2.0.

----";

fn root() -> String {
    github_raw_root("jenkinsci", "email-ext-plugin", "master")
}

#[test]
fn test_readme_conversion() {
    let markup = render_source("README.md", README, &SourceOptions::new(root())).unwrap();
    assert_eq!(markup, EXPECTED);
}

#[test]
fn test_independent_conversions_share_nothing() {
    let first = parse("[a][x]\n\n[x]: first.md", &ParseOptions::default()).unwrap();
    let second = parse("[a][x]", &ParseOptions::default()).unwrap();

    let first_markup = WikiRenderer::new(&root()).unwrap().render(&first).markup;
    let second_markup = WikiRenderer::new(&root()).unwrap().render(&second).markup;

    assert!(first_markup.ends_with("first.md]"));
    assert_eq!(second_markup, "[a][x]");
}

#[test]
fn test_empty_document() {
    let markup = WikiRenderer::new(&root())
        .unwrap()
        .render(&Document::default())
        .markup;
    assert_eq!(markup, "");
}

#[cfg(feature = "serde")]
#[test]
fn test_tree_from_json() {
    let json = r#"{"children": [
        {"node": "heading", "level": 2, "children": [{"node": "text", "text": "Hi"}]},
        {"node": "table", "children": []}
    ]}"#;
    let document: Document = serde_json::from_str(json).unwrap();
    let markup = WikiRenderer::new(&root()).unwrap().render(&document).markup;
    assert_eq!(markup, "h2. Hi");
}
