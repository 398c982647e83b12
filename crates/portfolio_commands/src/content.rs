//! Static terminal content: virtual directories, files, and the hidden challenge.
//!
//! This module depends only on [`SiteConfig`]; the command modules read from it, never the
//! other way around.

use crate::config::SiteConfig;

/// A directory `ls` lists and `cd`/`open` navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDirectory {
    pub name: &'static str,
    pub route: &'static str,
}

pub const DIRECTORIES: &[VirtualDirectory] = &[
    VirtualDirectory {
        name: "about",
        route: "/about",
    },
    VirtualDirectory {
        name: "experience",
        route: "/experience",
    },
    VirtualDirectory {
        name: "projects",
        route: "/projects",
    },
    VirtualDirectory {
        name: "blogs",
        route: "/blogs",
    },
    VirtualDirectory {
        name: "papers",
        route: "/papers",
    },
    VirtualDirectory {
        name: "books",
        route: "/books",
    },
    VirtualDirectory {
        name: "anime",
        route: "/anime",
    },
    VirtualDirectory {
        name: "hobbies",
        route: "/hobbies",
    },
];

/// Names that mean "home": no argument, `~`, `/`, `..`.
const HOME_ALIASES: &[&str] = &["~", "/", "..", "~/"];

/// Resolves a `cd`/`open` target to a route.
///
/// Accepts `blogs`, `blogs/`, `/blogs`, `~/blogs`, and any casing of the directory name.
pub fn resolve_route(target: &str) -> Option<&'static str> {
    if HOME_ALIASES.contains(&target) {
        return Some(portfolio_store::HOME_ROUTE);
    }
    let name = target
        .trim_start_matches("~/")
        .trim_start_matches('/')
        .trim_end_matches('/');
    DIRECTORIES
        .iter()
        .find(|directory| directory.name.eq_ignore_ascii_case(name))
        .map(|directory| directory.route)
}

/// Hidden challenge answer.
pub const FLAG: &str = "flag{y0u_f0und_th3_t3rm1nal_s3cr3t}";

/// [`FLAG`] in standard base64, as stored in `.secret`.
pub const FLAG_BASE64: &str = "ZmxhZ3t5MHVfZjB1bmRfdGgzX3Qzcm0xbmFsX3MzY3IzdH0=";

pub const HINTS: &[&str] = &[
    "Not everything in this directory shows up by default. Try `ls -a`.",
    "Dotfiles can be read like any other file.",
    "The contents look encoded. `decode` understands base64.",
];

pub const REWARD_LINES: &[&str] = &[
    "+--------------------------------------------+",
    "|  ACCESS GRANTED                            |",
    "|                                            |",
    "|  You found the hidden flag. Nicely done.   |",
    "|  Send it my way with `contact` and say hi. |",
    "+--------------------------------------------+",
];

pub const KERNEL_PANIC_LINES: &[&str] = &[
    "rm: removing '/bin'...",
    "rm: removing '/etc'...",
    "rm: removing '/home'...",
    "rm: removing '/usr'...",
    "Kernel panic - not syncing: Attempted to kill init!",
    "---[ end Kernel panic ]---",
    "Rebooting...",
];

/// A file `cat` can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualFile {
    pub name: &'static str,
    /// Only listed by `ls -a`.
    pub hidden: bool,
}

pub const FILES: &[VirtualFile] = &[
    VirtualFile {
        name: "about.txt",
        hidden: false,
    },
    VirtualFile {
        name: "contact.txt",
        hidden: false,
    },
    VirtualFile {
        name: "readme.md",
        hidden: false,
    },
    VirtualFile {
        name: ".secret",
        hidden: true,
    },
];

/// Contents of `name`, or `None` if no such file exists.
pub fn file_lines(name: &str, config: &SiteConfig) -> Option<Vec<String>> {
    let file = FILES.iter().find(|file| file.name == name)?;
    let lines = match file.name {
        "about.txt" => profile_lines(config),
        "contact.txt" => contact_lines(config),
        "readme.md" => vec![
            "# portfolio shell".to_string(),
            "A tiny terminal for browsing this site.".to_string(),
            "Type `help` for commands; pipes work too: `echo hi | base64`.".to_string(),
        ],
        ".secret" => vec![FLAG_BASE64.to_string()],
        _ => return None,
    };
    Some(lines)
}

pub fn profile_lines(config: &SiteConfig) -> Vec<String> {
    let profile = &config.profile;
    let mut lines = vec![
        format!("{} - {}", profile.name, profile.role),
        format!("Based in {}", profile.location),
    ];
    lines.extend(profile.summary.iter().cloned());
    lines
}

pub fn contact_lines(config: &SiteConfig) -> Vec<String> {
    let profile = &config.profile;
    [
        ("Email", &profile.email),
        ("GitHub", &profile.github),
        ("LinkedIn", &profile.linkedin),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label:<9}{value}"))
    .collect()
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flag_constant_matches_its_encoding() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(FLAG);
        assert_eq!(encoded, FLAG_BASE64);
    }

    #[test]
    fn routes_resolve_with_loose_spelling() {
        assert_eq!(resolve_route("blogs"), Some("/blogs"));
        assert_eq!(resolve_route("/blogs/"), Some("/blogs"));
        assert_eq!(resolve_route("~/Books"), Some("/books"));
        assert_eq!(resolve_route("~"), Some("/"));
        assert_eq!(resolve_route("nowhere"), None);
    }

    #[test]
    fn secret_file_holds_the_encoded_flag() {
        let config = SiteConfig::default();
        assert_eq!(
            file_lines(".secret", &config),
            Some(vec![FLAG_BASE64.to_string()])
        );
        assert_eq!(file_lines("missing.txt", &config), None);
    }
}
