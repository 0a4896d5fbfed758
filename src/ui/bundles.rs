use bevy::color::Color;
use bevy::prelude::*;

#[derive(Bundle)]
pub struct LabelBundle {
    pub text: Text,
    pub font: TextFont,
    pub color: TextColor,
    pub node: Node,
}

impl LabelBundle {
    pub fn new(text: &str, font_size: f32, color: Color) -> Self {
        Self {
            text: Text::new(text),
            font: TextFont {
                font_size,
                ..default()
            },
            color: TextColor(color),
            node: Node::default(),
        }
    }

    pub fn with_margin(mut self, margin: UiRect) -> Self {
        self.node.margin = margin;
        self
    }
}

#[derive(Bundle)]
pub struct PanelBundle {
    pub node: Node,
    pub background: BackgroundColor,
    pub border_radius: BorderRadius,
}

impl PanelBundle {
    /// Column anchored to the top-left corner of the window.
    pub fn top_left(padding: f32, background: Color) -> Self {
        Self {
            node: Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(padding)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            background: BackgroundColor(background),
            border_radius: BorderRadius::all(Val::Px(6.0)),
        }
    }
}
