use crate::agents::OutdatedPackage;
use clap::ValueEnum;
use colored::Colorize;

const LINE_ENDING: &str = "\n";

/// How emphasised tokens are decorated in the rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Markup {
    /// No decoration at all
    Plain,
    /// Console tags (`<info>`, `<comment>`, `<warning>`) for a tag-aware writer
    Tags,
    /// Terminal colors
    #[default]
    Ansi,
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Info,
    Comment,
    Warning,
}

impl Role {
    fn tag(self) -> &'static str {
        match self {
            Role::Info => "info",
            Role::Comment => "comment",
            Role::Warning => "warning",
        }
    }
}

impl Markup {
    fn apply(self, role: Role, text: &str) -> String {
        match self {
            Markup::Plain => text.to_string(),
            Markup::Tags => format!("<{tag}>{text}</{tag}>", tag = role.tag()),
            Markup::Ansi => match role {
                Role::Info => text.green().to_string(),
                Role::Comment => text.yellow().to_string(),
                Role::Warning => text.black().on_yellow().to_string(),
            },
        }
    }
}

/// Renders outdated-package records as a human-readable summary
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(records: &[OutdatedPackage], show_links: bool, markup: Markup) -> String {
        let mut output: Vec<String> = Vec::new();

        if records.is_empty() {
            output.push(markup.apply(Role::Info, "All packages are up to date."));
        } else {
            Self::render_outdated(&mut output, records, show_links, markup);
        }

        output.join(LINE_ENDING) + LINE_ENDING
    }

    fn render_outdated(
        output: &mut Vec<String>,
        records: &[OutdatedPackage],
        show_links: bool,
        markup: Markup,
    ) {
        let count = records.len();
        let header = format!(
            "{} {} not up to date:",
            count,
            if count == 1 { "package is" } else { "packages are" }
        );
        output.push(markup.apply(Role::Warning, &header));
        output.push(String::new());

        for record in records {
            let latest = markup.apply(Role::Comment, &record.last().pretty_version);
            // the tag format leaves the latest version unparenthesised
            let latest = match markup {
                Markup::Tags => latest,
                Markup::Plain | Markup::Ansi => format!("({})", latest),
            };

            output.push(format!(
                "  - {} ({}) latest is {}",
                markup.apply(Role::Info, &record.actual().pretty_name),
                markup.apply(Role::Comment, &record.actual().pretty_version),
                latest
            ));

            if show_links {
                for link in record.links() {
                    output.push(format!(
                        "    Required by {} ({})",
                        markup.apply(Role::Info, &link.source),
                        markup.apply(Role::Comment, &link.pretty_constraint)
                    ));
                }
            }

            output.push(String::new());
        }
    }
}
