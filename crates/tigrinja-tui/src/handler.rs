use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::app::App;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => insert_text(app, &text),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Esc => app.should_quit = true,

        // Ctrl+Enter is not reported by most terminals; Alt+Enter and Ctrl+T stand in for it
        KeyCode::Enter if alt || ctrl => app.submit_translate(),
        KeyCode::Char('t') if ctrl => app.submit_translate(),
        KeyCode::Enter => app.submit_send(),

        KeyCode::F(2) => app.cycle_ui_language(),
        KeyCode::F(3) => app.cycle_reply_language(),

        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::End if ctrl => app.scroll_to_latest(),

        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                let byte_pos = char_to_byte_index(&app.session.input, app.cursor);
                app.session.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.session.input.chars().count();
            if app.cursor < char_count {
                let byte_pos = char_to_byte_index(&app.session.input, app.cursor);
                app.session.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.session.input.chars().count();
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = app.session.input.chars().count();
        }
        KeyCode::Char(c) if !ctrl => {
            let byte_pos = char_to_byte_index(&app.session.input, app.cursor);
            app.session.input.insert(byte_pos, c);
            app.cursor += 1;
        }
        _ => {}
    }
}

/// Insert pasted text at the cursor. Line breaks become spaces since the input is one line.
fn insert_text(app: &mut App, text: &str) {
    let cleaned: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let byte_pos = char_to_byte_index(&app.session.input, app.cursor);
    app.session.input.insert_str(byte_pos, &cleaned);
    app.cursor += cleaned.chars().count();
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(area) = app.chat_area else {
        return;
    };
    let inside = mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row >= area.y
        && mouse.row < area.y + area.height;
    if !inside {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}
