//! End-to-end tick behavior against a recording canvas

mod common;

use common::{buttons, press, Op, RecordingCanvas};
use deckstat_core::art::CATALOG;
use deckstat_core::config::{PanelConfig, Profile};
use deckstat_core::mode::DisplayMode;
use deckstat_display::{DisplayError, StatusPanel};
use embedded_graphics::prelude::Point;

const BUTTON_A: usize = 0;
const BUTTON_B: usize = 1;
const BUTTON_C: usize = 2;

fn panel(profile: Profile) -> (StatusPanel, RecordingCanvas) {
    let config = PanelConfig {
        profile,
        ..PanelConfig::default()
    };
    let mut panel = StatusPanel::new(config, 0x1234_5678);
    let mut canvas = RecordingCanvas::new();
    panel.start(&mut canvas).unwrap();
    (panel, canvas)
}

#[test]
fn start_draws_frame_and_labels() {
    let (_, canvas) = panel(Profile::Cyberdeck);
    assert!(canvas.cleared_screen());
    for label in ["TIME", "IP", "TEMP", "CPU", "RAM"] {
        assert!(canvas.has_text(label), "missing label {label}");
    }
    assert_eq!(canvas.text_at("TIME"), Some(Point::new(4, 40)));
    assert!(canvas.ops.contains(&Op::HLine(Point::new(0, 28), 320, deckstat_display::palette::DARK_GREY)));
}

#[test]
fn first_tick_shows_placeholders() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    canvas.take();
    let mut serial: &[u8] = b"";
    let mut buttons = buttons();

    let sleep = panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(sleep, 5);
    for text in ["[no-host] //STATUS", "waiting...", "LAN n/a", "WAN n/a", "-", "--.-%", "  0.0%"] {
        assert!(canvas.has_text(text), "missing {text:?} in {:?}", canvas.texts());
    }
    assert_eq!(canvas.ops.last(), Some(&Op::Flush));
    assert!(buttons.iter().all(|b| b.serviced == 1));
}

#[test]
fn serial_values_reach_the_dashboard() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut serial: &[u8] =
        b"time=13:45:12;user=pi;hostname=deck;cpu=37.5;ram_total_mb=4096;ram_percent=50\r\nlocal_ip=10.0.0.2;cpu_temp_c=48.3\n";
    let mut buttons = buttons();

    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    for text in ["[pi@deck] //STATUS", "13:45:12", " 37.5%", " 50.0%", "LAN 10.0.0.2", "WAN n/a", " 48.3 C"] {
        assert!(canvas.has_text(text), "missing {text:?} in {:?}", canvas.texts());
    }
    assert_eq!(panel.model().lines_merged(), 2);
}

#[test]
fn partial_line_waits_for_terminator() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut buttons = buttons();

    let mut serial: &[u8] = b"hostname=de";
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(panel.model().snapshot().hostname.is_empty());
    assert_eq!(panel.assembler().len(), 11);

    let mut serial: &[u8] = b"ck\n";
    panel.tick(5, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.model().snapshot().hostname.as_str(), "deck");
}

#[test]
fn overlong_line_is_dropped() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut buttons = buttons();
    let mut bytes = b"cpu=99;".to_vec();
    bytes.extend(std::iter::repeat(b'x').take(600));
    bytes.extend_from_slice(b"\ncpu=12\n");

    let mut serial: &[u8] = &bytes;
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.model().snapshot().cpu, 12.0);
    assert_eq!(panel.model().lines_merged(), 1);
    assert_eq!(panel.assembler().overflow_count(), 1);
}

#[test]
fn dashboard_redraws_on_interval() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut serial: &[u8] = b"";
    let mut buttons = buttons();

    panel.tick(1000, &mut serial, &mut buttons, &mut canvas).unwrap();
    canvas.take();

    panel.tick(1100, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(canvas.take(), vec![Op::Flush]);

    panel.tick(1200, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text("waiting..."));
}

#[test]
fn header_and_ips_redraw_only_on_change() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut buttons = buttons();

    let mut serial: &[u8] = b"hostname=deck;local_ip=10.0.0.2\n";
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text("[deck] //STATUS"));
    assert!(canvas.has_text("LAN 10.0.0.2"));
    canvas.take();

    // Unchanged values: header and IP block are skipped, other rows redraw
    let mut serial: &[u8] = b"cpu=3\n";
    panel.tick(200, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(!canvas.has_text("[deck] //STATUS"));
    assert!(!canvas.has_text("LAN 10.0.0.2"));
    assert!(canvas.has_text("waiting..."));
    assert!(canvas.has_text("  3.0%"));
    canvas.take();

    // Changed hostname repaints the header only
    let mut serial: &[u8] = b"hostname=rig\n";
    panel.tick(400, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text("[rig] //STATUS"));
    assert!(!canvas.has_text("LAN 10.0.0.2"));
    canvas.take();

    // Edge A resets the caches
    let mut serial: &[u8] = b"";
    press(&mut buttons, BUTTON_A);
    panel.tick(450, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.cleared_screen());
    assert!(canvas.has_text("[rig] //STATUS"));
    assert!(canvas.has_text("LAN 10.0.0.2"));
}

#[test]
fn value_rows_clear_their_own_rectangle() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut serial: &[u8] = b"";
    let mut buttons = buttons();
    canvas.take();

    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    let ops = canvas.take();
    let time_at = ops
        .iter()
        .position(|op| matches!(op, Op::Text(text, _, _) if text == "waiting..."))
        .unwrap();
    match &ops[time_at - 1] {
        Op::Fill(area, _) => {
            assert_eq!(area.top_left, Point::new(72, 32));
            assert!(area.size.width < 320);
        }
        other => panic!("expected a row clear, got {other:?}"),
    }
    assert!(!canvas.cleared_screen());
}

#[test]
fn art_button_cycles_gallery() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut serial: &[u8] = b"";
    let mut buttons = buttons();
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    canvas.take();

    press(&mut buttons, BUTTON_B);
    panel.tick(10, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.mode(), DisplayMode::AsciiArt);
    assert!(canvas.cleared_screen());
    assert!(canvas.has_text(CATALOG[0].lines[0]));
    canvas.take();

    // Idle while showing art
    panel.tick(500, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(canvas.take(), vec![Op::Flush]);

    for i in 1..=CATALOG.len() {
        press(&mut buttons, BUTTON_B);
        panel.tick(600 + i as u32, &mut serial, &mut buttons, &mut canvas).unwrap();
        let expected = &CATALOG[i % CATALOG.len()];
        assert!(canvas.has_text(expected.lines[1]), "piece {}", expected.name);
        canvas.take();
    }
}

#[test]
fn rain_button_reseeds_and_slows_loop() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut serial: &[u8] = b"";
    let mut buttons = buttons();
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    canvas.take();

    press(&mut buttons, BUTTON_C);
    let sleep = panel.tick(10, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.mode(), DisplayMode::MatrixRain);
    assert_eq!(sleep, 5 + 40);
    assert!(canvas.cleared_screen());
    canvas.take();

    let sleep = panel.tick(55, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(sleep, 45);
    assert!(!canvas.cleared_screen());

    // Re-entry reseeds again
    press(&mut buttons, BUTTON_C);
    panel.tick(100, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.cleared_screen());
}

#[test]
fn serial_is_merged_before_edges() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut buttons = buttons();
    let mut serial: &[u8] = b"";
    press(&mut buttons, BUTTON_B);
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    canvas.take();

    let mut serial: &[u8] = b"hostname=late\n";
    press(&mut buttons, BUTTON_A);
    panel.tick(1, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.mode(), DisplayMode::Dashboard);
    assert!(canvas.has_text("[late] //STATUS"));
}

#[test]
fn classic_profile_ignores_decorative_modes() {
    let (mut panel, mut canvas) = panel(Profile::Classic);
    let mut buttons = buttons();
    let mut serial: &[u8] = b"load_1=0.21;load_5=0.17;load_15=0.11;local_ip=10.0.0.9\n";
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text(" 0.21  0.17  0.11"));
    assert!(panel.model().snapshot().local_ip.is_empty());
    canvas.take();

    let mut serial: &[u8] = b"";
    press(&mut buttons, BUTTON_B);
    press(&mut buttons, BUTTON_C);
    panel.tick(10, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert_eq!(panel.mode(), DisplayMode::Dashboard);
    assert!(!canvas.cleared_screen());
}

#[test]
fn network_profile_shows_rates() {
    let (mut panel, mut canvas) = panel(Profile::Network);
    let mut buttons = buttons();
    let mut serial: &[u8] = b"";
    panel.tick(0, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text("NET"));
    assert!(canvas.has_text("-"));
    canvas.take();

    let mut serial: &[u8] = b"net_up_mbps=1.5;net_down_mbps=12.25\n";
    panel.tick(200, &mut serial, &mut buttons, &mut canvas).unwrap();
    assert!(canvas.has_text("U  1.50 D 12.25"));
}

#[test]
fn draw_errors_do_not_lose_data() {
    let (mut panel, mut canvas) = panel(Profile::Cyberdeck);
    let mut buttons = buttons();
    canvas.fail_fills = true;

    let mut serial: &[u8] = b"cpu=77\n";
    let result = panel.tick(0, &mut serial, &mut buttons, &mut canvas);
    assert_eq!(result, Err(DisplayError::Communication));
    assert_eq!(panel.model().snapshot().cpu, 77.0);

    canvas.fail_fills = false;
    canvas.take();
    press(&mut buttons, BUTTON_A);
    let mut serial: &[u8] = b"";
    assert_eq!(panel.tick(5, &mut serial, &mut buttons, &mut canvas), Ok(5));
    assert!(canvas.has_text(" 77.0%"));
}
