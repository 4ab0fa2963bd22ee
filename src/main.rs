#[cfg(feature = "gui")]
use eframe::egui;

#[cfg(feature = "gui")]
use trax::{
    slot_time_label, ClickModifiers, ClockEvent, EditMode, EditOutcome, Editor, Palette,
    PlaybackClock, TimelineConfig,
};

#[cfg(feature = "gui")]
const COLORS: [(u8, u8, u8); 9] = [
    (0xff, 0x6b, 0x6b),
    (0x4e, 0xcd, 0xc4),
    (0x45, 0xb7, 0xd1),
    (0xf9, 0xca, 0x24),
    (0x6c, 0x5c, 0xe7),
    (0xa2, 0x9b, 0xfe),
    (0xfd, 0x79, 0xa8),
    (0xfd, 0xcb, 0x6e),
    (0x55, 0xef, 0xc4),
];

#[cfg(feature = "gui")]
const SYMBOLS: [&str; 9] = ["●", "■", "▲", "◆", "★", "♪", "♫", "◉", "◈"];

#[cfg(feature = "gui")]
const VIEWPORT_SLOTS: usize = 16;

#[cfg(feature = "gui")]
fn main() -> Result<(), eframe::Error> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "trax=debug,warn".into()),
        )
        .init();

    let config = match std::env::var("TRAX_CONFIG") {
        Ok(path) => TimelineConfig::load(&path).unwrap_or_else(|err| {
            tracing::warn!(%err, "Falling back to default config");
            TimelineConfig::default()
        }),
        Err(_) => TimelineConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 600.0])
            .with_title("TRAX - Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "TRAX",
        options,
        Box::new(move |_cc| Ok(Box::new(TimelineApp::new(config)))),
    )
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("This binary requires the 'gui' feature to be enabled");
    std::process::exit(1);
}

#[cfg(feature = "gui")]
struct TimelineApp {
    editor: Editor,
    clock: PlaybackClock,
    config: TimelineConfig,

    // UI state
    scroll_slot: usize,
    hover: Option<(usize, usize)>,
}

#[cfg(feature = "gui")]
impl TimelineApp {
    fn new(mut config: TimelineConfig) -> Self {
        // The palette is whatever this front-end can draw
        config.palette = Palette::new(COLORS.len(), SYMBOLS.len());

        Self {
            editor: Editor::new(&config),
            clock: PlaybackClock::new(),
            config,
            scroll_slot: 0,
            hover: None,
        }
    }

    fn visible(&self) -> std::ops::Range<usize> {
        self.scroll_slot..self.scroll_slot + VIEWPORT_SLOTS
    }

    fn handle_clock_events(&mut self) {
        for event in self.clock.poll_events() {
            match event {
                ClockEvent::Tick => {
                    let playhead = self.editor.transport_mut().advance();
                    // Follow the playhead once it nears the right edge
                    if playhead + 2 > self.scroll_slot + VIEWPORT_SLOTS {
                        self.scroll_slot = playhead.saturating_sub(VIEWPORT_SLOTS / 2);
                    }
                }
            }
        }
    }

    fn start_playback(&mut self) {
        self.editor.transport_mut().play();
        self.clock.start(self.config.slot_duration());
    }

    fn stop_playback(&mut self) {
        self.clock.stop();
        self.editor.transport_mut().stop();
    }

    fn handle_click(&mut self, channel_id: usize, position: usize, modifiers: ClickModifiers) {
        let visible = self.visible();
        match self.editor.click(channel_id, position, modifiers, visible) {
            Ok(EditOutcome::Ignored) => {}
            Ok(outcome) => tracing::trace!(?outcome, "Click handled"),
            Err(err) => tracing::debug!(%err, "Click rejected"),
        }
    }

    fn template_controls(&mut self, ui: &mut egui::Ui) {
        let mut template = self.editor.template().clone();
        let mut changed = false;

        ui.horizontal(|ui| {
            let mut mode = self.editor.mode();
            egui::ComboBox::from_label("Mode")
                .selected_text(mode.label())
                .show_ui(ui, |ui| {
                    for option in EditMode::ALL {
                        ui.selectable_value(&mut mode, option, option.label());
                    }
                });
            self.editor.set_mode(mode);

            ui.add_space(20.0);

            ui.label("Color:");
            for (index, &(r, g, b)) in COLORS.iter().enumerate() {
                let marker = if template.color_index == index { "✔" } else { " " };
                let button = egui::Button::new(marker)
                    .min_size(egui::vec2(20.0, 20.0))
                    .fill(egui::Color32::from_rgb(r, g, b));
                if ui.add(button).clicked() {
                    template.color_index = index;
                    changed = true;
                }
            }

            ui.add_space(20.0);

            ui.label("Symbol:");
            for (index, symbol) in SYMBOLS.iter().enumerate() {
                if ui
                    .selectable_label(template.symbol_index == index, *symbol)
                    .clicked()
                {
                    template.symbol_index = index;
                    changed = true;
                }
            }

            ui.add_space(20.0);

            ui.label("Length:");
            let mut length = template.length;
            if ui.add(egui::Slider::new(&mut length, 1..=8)).changed() {
                template.length = length;
                template.original_length = length;
                changed = true;
            }
        });

        if changed {
            // A hand-built template starts a new instance
            template.instance_id = None;
            self.editor.set_template(template);
        }
    }

    fn transport_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.editor.transport().is_playing() {
                if ui.button("⏸ Stop").clicked() {
                    self.stop_playback();
                }
            } else if ui.button("▶ Play").clicked() {
                self.start_playback();
            }

            ui.add_space(20.0);

            ui.label("Playhead:");
            let mut playhead = self.editor.transport().playhead();
            if ui.add(egui::DragValue::new(&mut playhead)).changed() {
                self.editor.transport_mut().set_playhead(playhead);
            }
            ui.label(slot_time_label(playhead, self.config.slot_duration()));

            ui.add_space(20.0);

            if ui.button("+ Channel").clicked() {
                self.editor.add_channel();
            }

            ui.add_space(20.0);

            let total = self.editor.total_slots(VIEWPORT_SLOTS);
            if ui.button("◀").clicked() {
                self.scroll_slot = self.scroll_slot.saturating_sub(VIEWPORT_SLOTS / 2);
            }
            if ui.button("▶").clicked() {
                let max_scroll = total.saturating_sub(VIEWPORT_SLOTS);
                self.scroll_slot = (self.scroll_slot + VIEWPORT_SLOTS / 2).min(max_scroll);
            }
            ui.label(format!(
                "Slots {}-{} of {}",
                self.scroll_slot,
                self.scroll_slot + VIEWPORT_SLOTS - 1,
                total
            ));
        });
    }

    fn grid(&mut self, ui: &mut egui::Ui) {
        let timeline = self.editor.timeline();
        let connectors = timeline.connections();
        let playhead = self.editor.transport().playhead();
        let preview = self
            .hover
            .and_then(|(channel_id, position)| {
                self.editor
                    .preview(channel_id, position)
                    .map(|span| (channel_id, span))
            });
        let modifiers = ui.ctx().input(|i| ClickModifiers {
            ctrl: i.modifiers.ctrl,
            alt: i.modifiers.alt,
        });

        let mut clicked = None;
        let mut picked = None;
        let mut hovered = None;

        ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);

        // Header with time labels
        ui.horizontal(|ui| {
            ui.add_sized([50.0, 16.0], egui::Label::new(""));
            for slot in self.visible() {
                let every = self.config.label_every;
                let text = if every > 0 && slot % every == 0 {
                    slot_time_label(slot, self.config.slot_duration())
                } else {
                    String::new()
                };
                ui.add_sized([44.0, 16.0], egui::Label::new(text));
            }
        });

        for channel in timeline.channels() {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [50.0, 44.0],
                    egui::Label::new(format!("Ch {}", channel.id() + 1)),
                );

                for slot in self.visible() {
                    let module = channel.module_at(slot);
                    let in_preview = preview
                        .as_ref()
                        .is_some_and(|(id, span)| *id == channel.id() && span.contains(&slot));
                    let connector = connectors
                        .iter()
                        .find(|c| c.channel_id == channel.id() && c.span().contains(&slot));

                    let (text, fill) = match module {
                        Some(module) => {
                            let (r, g, b) = COLORS[module.color_index()];
                            let text = if slot == module.position() {
                                SYMBOLS[module.symbol_index()]
                            } else {
                                ""
                            };
                            (text, egui::Color32::from_rgb(r, g, b))
                        }
                        None if in_preview => {
                            let (r, g, b) = COLORS[self.editor.template().color_index];
                            (
                                SYMBOLS[self.editor.template().symbol_index],
                                egui::Color32::from_rgba_unmultiplied(r, g, b, 100),
                            )
                        }
                        None => match connector {
                            Some(c) => {
                                let (r, g, b) = COLORS[c.color_index];
                                ("─", egui::Color32::from_rgb(r / 3, g / 3, b / 3))
                            }
                            None => ("", egui::Color32::from_rgb(40, 40, 40)),
                        },
                    };

                    let mut button = egui::Button::new(text)
                        .min_size(egui::vec2(44.0, 44.0))
                        .fill(fill);
                    if slot == playhead {
                        button = button.stroke(egui::Stroke::new(2.0, egui::Color32::RED));
                    }

                    let response = ui.add(button);
                    if response.clicked() {
                        clicked = Some((channel.id(), slot));
                    }
                    if response.secondary_clicked() {
                        picked = Some((channel.id(), slot));
                    }
                    if response.hovered() {
                        hovered = Some((channel.id(), slot));
                    }
                }
            });
        }

        self.hover = hovered;
        if let Some((channel_id, slot)) = clicked {
            self.handle_click(channel_id, slot, modifiers);
        }
        if let Some((channel_id, slot)) = picked {
            self.editor.pick(channel_id, slot);
        }
    }
}

#[cfg(feature = "gui")]
impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        self.handle_clock_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("TRAX - Timeline");
            ui.add_space(10.0);

            self.template_controls(ui);
            ui.add_space(10.0);
            self.transport_controls(ui);
            ui.add_space(20.0);

            self.grid(ui);

            // Info
            ui.separator();
            ui.label("Click to use the active tool, Ctrl-click removes, Alt-click fills, right-click picks");
        });
    }
}
