//! # Theme Configuration
//!
//! Colors and status styling for the duty tracker screens.
//!
//! There is no process-wide theme: a [`Theme`] value is created once and
//! handed to whatever needs it.
//!
//! ## Usage
//! ```rust
//! use frontend::theme::{StatusBadge, Theme};
//! use backend::domain::models::DutyStatus;
//!
//! let theme = Theme::light();
//! let badge = StatusBadge::for_status(DutyStatus::Overdue, &theme);
//! assert_eq!(badge.label, "Overdue");
//! ```

use backend::domain::models::{DutyStatus, DutyType};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Status and feedback colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusColors {
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutColors {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyColors {
    pub primary: Color,
    pub secondary: Color,
    pub on_accent: Color,
}

/// Chart series colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub personal: Color,
    pub company: Color,
    pub gauge_track: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub accent: Color,
    pub status: StatusColors,
    pub layout: LayoutColors,
    pub typography: TypographyColors,
    pub chart: ChartColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            accent: Color::rgb(0x3D, 0x5A, 0xFE),
            status: StatusColors {
                success: Color::rgb(0x2E, 0x7D, 0x32),
                warning: Color::rgb(0xF9, 0xA8, 0x25),
                danger: Color::rgb(0xC6, 0x28, 0x28),
                info: Color::rgb(0x02, 0x88, 0xD1),
            },
            layout: LayoutColors {
                background: Color::rgb(0xF7, 0xF8, 0xFA),
                surface: Color::rgb(0xFF, 0xFF, 0xFF),
                border: Color::rgb(0xE0, 0xE3, 0xE8),
            },
            typography: TypographyColors {
                primary: Color::rgb(0x1F, 0x23, 0x29),
                secondary: Color::rgb(0x5F, 0x67, 0x73),
                on_accent: Color::rgb(0xFF, 0xFF, 0xFF),
            },
            chart: ChartColors {
                personal: Color::rgb(0x3D, 0x5A, 0xFE),
                company: Color::rgb(0x00, 0x96, 0x88),
                gauge_track: Color::rgb(0xE0, 0xE3, 0xE8),
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            accent: Color::rgb(0x8C, 0x9E, 0xFF),
            status: StatusColors {
                success: Color::rgb(0x81, 0xC7, 0x84),
                warning: Color::rgb(0xFF, 0xD5, 0x4F),
                danger: Color::rgb(0xE5, 0x73, 0x73),
                info: Color::rgb(0x4F, 0xC3, 0xF7),
            },
            layout: LayoutColors {
                background: Color::rgb(0x12, 0x14, 0x18),
                surface: Color::rgb(0x1C, 0x1F, 0x25),
                border: Color::rgb(0x2E, 0x33, 0x3B),
            },
            typography: TypographyColors {
                primary: Color::rgb(0xEC, 0xEE, 0xF1),
                secondary: Color::rgb(0xA0, 0xA7, 0xB2),
                on_accent: Color::rgb(0x12, 0x14, 0x18),
            },
            chart: ChartColors {
                personal: Color::rgb(0x8C, 0x9E, 0xFF),
                company: Color::rgb(0x4D, 0xB6, 0xAC),
                gauge_track: Color::rgb(0x2E, 0x33, 0x3B),
            },
        }
    }
}

/// Label and colors for a duty status chip
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub foreground: Color,
    pub background: Color,
}

impl StatusBadge {
    pub fn for_status(status: DutyStatus, theme: &Theme) -> Self {
        let (label, color) = match status {
            DutyStatus::Paid => ("Paid", theme.status.success),
            DutyStatus::Pending => ("Pending", theme.status.warning),
            DutyStatus::Overdue => ("Overdue", theme.status.danger),
        };
        Self {
            label,
            foreground: color,
            background: color.with_alpha(0x26),
        }
    }

    pub fn for_duty_type(duty_type: DutyType, theme: &Theme) -> Self {
        let (label, color) = match duty_type {
            DutyType::Payable => ("Payable", theme.status.info),
            DutyType::Actionable => ("Actionable", theme.accent),
        };
        Self {
            label,
            foreground: color,
            background: color.with_alpha(0x26),
        }
    }
}
