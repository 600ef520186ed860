use chrono::{Local, NaiveDate};
use flexi_logger::Logger;
use month_grid::{
    GridConfig, HolidayTable, MonthGrid, MonthKey, WeekStart, load_holidays_from_csv,
    load_holidays_from_json, save_holidays_to_csv, save_holidays_to_json,
};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

const CELL_WIDTH: usize = 6;

fn render_day(cell: &month_grid::DayCell, highlight_weekends: bool) -> String {
    let mut marker = String::new();
    if cell.is_holiday() {
        marker.push('!');
    }
    if highlight_weekends && cell.is_weekend() {
        marker.push('*');
    }
    if cell.is_today() {
        format!("[{:>2}]{}", cell.day(), marker)
    } else {
        format!(" {:>2} {}", cell.day(), marker)
    }
}

fn render_month(grid: &MonthGrid, highlight_weekends: bool) -> String {
    let width = CELL_WIDTH * 7;
    let title = format!("{} {}", grid.key().name(), grid.key().year());

    let mut out = String::new();
    out.push_str(&format!("{:^width$}\n", title, width = width));
    for label in grid.week_start().weekday_labels() {
        out.push_str(&format!("{:^width$}", label, width = CELL_WIDTH));
    }
    out.push('\n');

    for week in grid.weeks() {
        for slot in week {
            match slot {
                Some(cell) => out.push_str(&format!(
                    "{:<width$}",
                    render_day(cell, highlight_weekends),
                    width = CELL_WIDTH
                )),
                None => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push('\n');
    }

    let holidays: Vec<String> = grid
        .holidays()
        .map(|cell| format!("  {:>2}  {}", cell.day(), cell.holiday_name().unwrap_or_default()))
        .collect();
    if !holidays.is_empty() {
        out.push_str("Holidays:\n");
        out.push_str(&holidays.join("\n"));
        out.push('\n');
    }
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                     Show this help\n  show                     Show the current month\n  next | prev              Move one month forward/back\n  go <YYYY-MM>             Jump to a month\n  today                    Jump to the current month\n  year [YYYY]              Show all twelve months of a year\n  week <sun|mon>           Set the first column of the week\n  holidays                 List this month's holidays\n  load <json|csv> <path>   Replace the holiday table from a file\n  save <json|csv> <path>   Write the holiday table to a file\n  json                     Print the current month grid as JSON\n  quit|exit                Exit"
    );
}

struct Session {
    config: GridConfig,
    holidays: HolidayTable,
    current: MonthKey,
}

impl Session {
    fn grid(&self, today: &NaiveDate) -> MonthGrid {
        self.config.month_grid(self.current, &self.holidays, today)
    }

    fn show(&self, today: &NaiveDate) {
        println!("{}", render_month(&self.grid(today), self.config.highlight_weekends));
    }

    fn navigate(&mut self, delta: i32, today: &NaiveDate) {
        match self.current.navigate(delta) {
            Ok(key) => {
                self.current = key;
                self.show(today);
            }
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn load_config(path: Option<PathBuf>) -> (GridConfig, HolidayTable) {
    let config = match GridConfig::locate(path) {
        Some(path) => match GridConfig::load(&path) {
            Ok(config) => {
                println!("Config loaded from {}.", path.display());
                config
            }
            Err(e) => {
                println!("Error loading config {}: {}", path.display(), e);
                GridConfig::default()
            }
        },
        None => GridConfig::default(),
    };
    let holidays = match config.resolve_holidays() {
        Ok(table) => table,
        Err(e) => {
            println!("Error loading holiday files: {}", e);
            config.holidays.clone()
        }
    };
    (config, holidays)
}

fn main() {
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logger init failed: {}", e);
            None
        }
    };

    let today = Local::now().date_naive();
    let (config, holidays) = load_config(env::args().nth(1).map(PathBuf::from));
    let current = match MonthKey::containing(&today) {
        Ok(key) => key,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let mut session = Session {
        config,
        holidays,
        current,
    };

    println!("Month Grid (CLI) - type 'help' for commands\n");
    session.show(&today);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => session.show(&today),
            "next" => session.navigate(1, &today),
            "prev" => session.navigate(-1, &today),
            "today" => match MonthKey::containing(&today) {
                Ok(key) => {
                    session.current = key;
                    session.show(&today);
                }
                Err(e) => println!("Error: {}", e),
            },
            "go" => match parts.next().map(str::parse::<MonthKey>) {
                Some(Ok(key)) => {
                    session.current = key;
                    session.show(&today);
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: go <YYYY-MM>"),
            },
            "year" => {
                let year = match parts.next() {
                    Some(s) => match s.parse::<i32>() {
                        Ok(y) => y,
                        Err(_) => {
                            println!("Invalid year");
                            continue;
                        }
                    },
                    None => session.current.year(),
                };
                match session.config.year_grid(year, &session.holidays, &today) {
                    Ok(grids) => {
                        println!("Annual Calendar {}\n", year);
                        for grid in &grids {
                            println!("{}", render_month(grid, session.config.highlight_weekends));
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "week" => match parts.next().map(str::parse::<WeekStart>) {
                Some(Ok(week_start)) => {
                    session.config.week_start = week_start;
                    println!("Week starts on {}.", week_start.as_str());
                    session.show(&today);
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: week <sun|mon>"),
            },
            "holidays" => {
                let grid = session.grid(&today);
                let mut any = false;
                for cell in grid.holidays() {
                    any = true;
                    println!(
                        "{}-{:02}  {}",
                        grid.key(),
                        cell.day(),
                        cell.holiday_name().unwrap_or_default()
                    );
                }
                if !any {
                    println!("No holidays in {} {}.", grid.key().name(), grid.key().year());
                }
            }
            "load" => {
                let fmt = parts.next();
                let path = parts.next();
                let loaded = match (fmt, path) {
                    (Some("json"), Some(path)) => Some((path, load_holidays_from_json(path))),
                    (Some("csv"), Some(path)) => Some((path, load_holidays_from_csv(path))),
                    _ => None,
                };
                match loaded {
                    Some((path, Ok(table))) => {
                        println!("Loaded {} holidays from {}.", table.len(), path);
                        session.holidays = table;
                        session.show(&today);
                    }
                    Some((_, Err(e))) => println!("Error loading holidays: {}", e),
                    None => println!("Usage: load <json|csv> <path>"),
                }
            }
            "save" => {
                let fmt = parts.next();
                let path = parts.next();
                let saved = match (fmt, path) {
                    (Some("json"), Some(path)) => Some((path, save_holidays_to_json(&session.holidays, path))),
                    (Some("csv"), Some(path)) => Some((path, save_holidays_to_csv(&session.holidays, path))),
                    _ => None,
                };
                match saved {
                    Some((path, Ok(()))) => println!("Holidays saved to {}.", path),
                    Some((_, Err(e))) => println!("Error saving holidays: {}", e),
                    None => println!("Usage: save <json|csv> <path>"),
                }
            }
            "json" => match serde_json::to_string_pretty(&session.grid(&today)) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("Error serializing grid: {}", e),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
