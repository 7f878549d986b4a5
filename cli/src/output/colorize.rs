use crate::format::EntryOut;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

pub struct ColorizeEntry<'a>(pub &'a EntryOut);

impl<'a> Colorize for ColorizeEntry<'a> {
    fn to_colored(&self) -> String {
        let entry = self.0;
        let mut s = String::new();
        let position = entry.position.to_string();

        if entry.highlighted {
            s.push_str(&format!(
                "{}{}. {}\n",
                "*".yellow().bold(),
                position.bright_blue(),
                entry.title.bold().black().on_yellow(),
            ));
        } else {
            s.push_str(&format!(
                "{}. {}\n",
                position.bright_blue(),
                entry.title.bold().green(),
            ));
        }

        let padding = position.len() + 2 + usize::from(entry.highlighted);
        // padding for alignment
        s.push_str(&format!("{:>padding$} {}\n", ">".red(), entry.url.yellow()));

        if !entry.date.is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "@".red(), entry.date.dimmed()));
        }
        s
    }
}
