//! Integration tests for the registry public API.

use foundry::cli::help;
use foundry::cli::{
    builtin_registry, Alias, ArgSpec, CommandDispatcher, CommandGroup, CommandResult, Context,
    ParsedInvocation, Registry, RegistryError, Resolution, Subcommand,
};

fn noop(_ctx: &mut Context<'_>, _args: &ParsedInvocation) -> foundry::Result<CommandResult> {
    Ok(CommandResult::success())
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn builtin_registry_is_valid() {
    let registry = builtin_registry().unwrap();
    assert_eq!(registry.list_groups().len(), 8);
    assert_eq!(registry.aliases().len(), 2);
}

#[test]
fn custom_registry_resolves() {
    let registry = Registry::new(
        vec![CommandGroup::new("widget", "Widgets")
            .subcommand(Subcommand::new("spin", "Spin one", noop).arg(ArgSpec::positional(
                "id",
                "<WIDGET_ID>",
                "Widget",
            )))],
        vec![Alias::new("spin", "widget", "spin")],
    )
    .unwrap();

    let dispatcher = CommandDispatcher::new(&registry);
    match dispatcher.resolve(&argv(&["spin", "w1"])).unwrap() {
        Resolution::Invoke { invocation, .. } => {
            assert_eq!(invocation.group, Some("widget"));
            assert_eq!(invocation.value("id"), Some("w1"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn alias_to_missing_subcommand_is_rejected() {
    let err = Registry::new(
        vec![CommandGroup::new("widget", "Widgets")],
        vec![Alias::new("spin", "widget", "spin")],
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::DanglingAlias { .. }));
}

#[test]
fn every_subcommand_help_shows_its_usage() {
    let registry = builtin_registry().unwrap();
    for group in registry.list_groups() {
        for sub in &group.subcommands {
            let text = help::render_subcommand(&registry, group, sub);
            assert!(
                text.contains(&help::usage_line(group, sub)),
                "{} {}",
                group.name,
                sub.name
            );
            for arg in sub.positionals() {
                assert!(text.contains(arg.placeholder), "{}", arg.placeholder);
            }
        }
    }
}

#[test]
fn resolution_is_pure() {
    let registry = builtin_registry().unwrap();
    let dispatcher = CommandDispatcher::new(&registry);

    assert!(matches!(
        dispatcher.resolve(&argv(&["task"])).unwrap(),
        Resolution::GroupHelp(group) if group.name == "task"
    ));
    assert!(matches!(
        dispatcher.resolve(&argv(&["help", "api"])).unwrap(),
        Resolution::GroupHelp(group) if group.direct
    ));
    assert!(dispatcher.resolve(&argv(&["task", "delete", "1"])).is_err());
}
