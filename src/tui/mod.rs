pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use app::{InputMode, Page};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let colors = ThemeColors::for_theme(resolve_theme());
    let mut events = EventHandler::new(250); // 250ms tick

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app, &colors))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }
                KeyCode::Char('q') => app.should_quit = true,

                // Page navigation
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char(ch @ '1'..='5') => {
                    app.goto_page(Page::ALL[(ch as u8 - b'1') as usize]);
                }

                // Field navigation (scrolls the report on the Narrative page)
                KeyCode::Char('j') | KeyCode::Down => {
                    if app.page == Page::Narrative {
                        app.scroll_narrative(1);
                    } else {
                        app.next_field();
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if app.page == Page::Narrative {
                        app.scroll_narrative(-1);
                    } else {
                        app.previous_field();
                    }
                }

                // Step the selected value
                KeyCode::Char('h') | KeyCode::Left => app.adjust_current(-1.0),
                KeyCode::Char('l') | KeyCode::Right => app.adjust_current(1.0),

                // Edit the selected field
                KeyCode::Enter => {
                    if app.page == Page::Narrative {
                        app.generate_now();
                    } else {
                        app.start_edit();
                    }
                }

                // Workflow actions
                KeyCode::Char('c') => app.compute_score_now(),
                KeyCode::Char('p') => app.project_now(),
                KeyCode::Char('g') => app.generate_now(),
                KeyCode::Char('w') => app.export_now(),
                KeyCode::Char('R') => app.reset(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        InputMode::Editing => {
            match key.code {
                KeyCode::Enter => app.commit_edit(),
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Backspace => {
                    app.edit_buffer.pop();
                }

                // Character input; don't propagate anything else to Normal mode
                KeyCode::Char(c) if !c.is_control() => {
                    app.edit_buffer.push(c);
                }
                _ => {}
            }
        }
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{DimensionScores, ValuationParameters, Weights};
    use crate::config::Profile;

    fn sample_app() -> App {
        App::new(
            Profile::default(),
            DimensionScores::default(),
            Weights::default(),
            ValuationParameters::default(),
            false,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = sample_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_computes_instead_of_quitting() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.should_quit);
        assert!(app.score.is_some());
    }

    #[test]
    fn test_number_key_jumps_to_page() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.page, Page::Valuation);
    }

    #[test]
    fn test_edit_mode_swallows_action_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter); // start editing "Analyst name"
        assert_eq!(app.input_mode, InputMode::Editing);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_workflow_keys_chain() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('g'));
        assert!(app.narrative.is_some());
    }
}
