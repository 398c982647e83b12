use std::rc::Rc;

use terminal_contract::ShellError;
use terminal_shell::{CommandContext, CommandRegistration};

use crate::{config::SiteConfig, content};

pub(super) fn registrations(config: Rc<SiteConfig>) -> Vec<CommandRegistration> {
    vec![
        ls_registration(),
        cd_registration(),
        pwd_registration(config.clone()),
        cat_registration(config),
        open_registration(),
    ]
}

fn ls_registration() -> CommandRegistration {
    super::registration(
        super::navigation("ls", "List directories and files.", "ls [-a]"),
        Rc::new(|ctx: CommandContext| {
            Box::pin(async move {
                let show_hidden = match ctx.args.as_slice() {
                    [] => false,
                    [flag] if flag == "-a" || flag == "-la" || flag == "-al" => true,
                    _ => return Err(ShellError::usage("usage: ls [-a]")),
                };
                let mut entries = content::DIRECTORIES
                    .iter()
                    .map(|directory| format!("{}/", directory.name))
                    .collect::<Vec<_>>();
                entries.extend(
                    content::FILES
                        .iter()
                        .filter(|file| show_hidden || !file.hidden)
                        .map(|file| file.name.to_string()),
                );
                ctx.print(entries.join("  "));
                Ok(())
            })
        }),
    )
}

fn cd_registration() -> CommandRegistration {
    CommandRegistration {
        completion: Some(super::directory_completion()),
        ..super::registration(
            super::navigation("cd", "Go to a section of the site.", "cd [dir]"),
            Rc::new(|ctx: CommandContext| {
                Box::pin(async move {
                    let target = ctx.args.first().map(String::as_str).unwrap_or("~");
                    let Some(route) = content::resolve_route(target) else {
                        return Err(ShellError::usage(format!(
                            "cd: no such directory: {target}"
                        )));
                    };
                    ctx.navigate(route);
                    ctx.print(format!("Navigating to {route}..."));
                    Ok(())
                })
            }),
        )
    }
}

fn pwd_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::navigation("pwd", "Print the working directory.", "pwd"),
        Rc::new(move |ctx: CommandContext| {
            let home = config.prompt.home_path();
            Box::pin(async move {
                ctx.print(home);
                Ok(())
            })
        }),
    )
}

fn cat_registration(config: Rc<SiteConfig>) -> CommandRegistration {
    super::registration(
        super::navigation("cat", "Print a file.", "cat <file>"),
        Rc::new(move |ctx: CommandContext| {
            let config = config.clone();
            Box::pin(async move {
                let Some(name) = ctx.args.first() else {
                    return Err(ShellError::usage("usage: cat <file>"));
                };
                if content::resolve_route(name).is_some() {
                    return Err(ShellError::usage(format!("cat: {name}: Is a directory")));
                }
                match content::file_lines(name, &config) {
                    Some(lines) => {
                        ctx.print_lines(lines);
                        Ok(())
                    }
                    None => Err(ShellError::usage(format!(
                        "cat: {name}: No such file or directory"
                    ))),
                }
            })
        }),
    )
}

fn open_registration() -> CommandRegistration {
    CommandRegistration {
        completion: Some(super::directory_completion()),
        ..super::registration(
            super::navigation(
                "open",
                "Open a link in a new tab, or a section of the site.",
                "open <url|dir>",
            ),
            Rc::new(|ctx: CommandContext| {
                Box::pin(async move {
                    let Some(target) = ctx.args.first().cloned() else {
                        return Err(ShellError::usage("usage: open <url|dir>"));
                    };
                    if target.starts_with("http://") || target.starts_with("https://") {
                        ctx.open_external(&target).await.map_err(|err| {
                            ShellError::internal(format!("open: could not open {target}: {err}"))
                        })?;
                        ctx.print(format!("Opening {target} in a new tab..."));
                        return Ok(());
                    }
                    let Some(route) = content::resolve_route(&target) else {
                        return Err(ShellError::usage(format!(
                            "open: no such directory or url: {target}"
                        )));
                    };
                    ctx.navigate(route);
                    ctx.print(format!("Navigating to {route}..."));
                    Ok(())
                })
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::testing::TestTerminal;

    #[test]
    fn ls_hides_dotfiles_unless_asked() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("ls"));
        block_on(terminal.run("ls -a"));
        let lines = terminal.lines();
        assert!(lines[0].starts_with("about/  experience/"));
        assert!(!lines[0].contains(".secret"));
        assert!(lines[1].ends_with(".secret"));
    }

    #[test]
    fn cd_without_argument_goes_home() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("cd projects"));
        block_on(terminal.run("cd"));
        assert_eq!(terminal.navigation.pushed(), vec!["/projects", "/"]);
        assert_eq!(terminal.store.snapshot().ui.route, "/");
    }

    #[test]
    fn cat_reports_missing_files_and_directories() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("cat nope.txt"));
        block_on(terminal.run("cat blogs"));
        block_on(terminal.run("cat"));
        assert_eq!(
            terminal.lines(),
            vec![
                "cat: nope.txt: No such file or directory",
                "cat: blogs: Is a directory",
                "usage: cat <file>",
            ]
        );
    }

    #[test]
    fn pwd_prints_the_virtual_home() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("pwd"));
        assert_eq!(terminal.lines(), vec!["/home/guest"]);
    }

    #[test]
    fn open_routes_urls_and_directories_differently() {
        let terminal = TestTerminal::new();
        block_on(terminal.run("open https://example.com"));
        block_on(terminal.run("open books"));
        assert_eq!(terminal.navigation.pushed(), vec!["/books"]);
        assert_eq!(
            terminal.lines(),
            vec![
                "Opening https://example.com in a new tab...",
                "Navigating to /books...",
            ]
        );
    }
}
