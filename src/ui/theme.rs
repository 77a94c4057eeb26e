//! テーマシステム
//!
//! テキストエリアの各要素のスタイル定義。テーマはグローバルに保持せず、描画呼び出しごとに
//! ホストから明示的に渡す。

use crossterm::style::{
    Attribute as CAttribute, Color as CColor, ContentStyle,
};
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// テーマの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThemeType {
    /// カーソル反転以外に装飾を持たない
    Plain,
    Light,
    Dark,
}

/// テキストエリアの構成要素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 本文
    Text,
    /// 行番号
    LineNumber,
    /// プロンプト
    Prompt,
    /// カーソル
    Cursor,
    /// プレースホルダー
    Placeholder,
    /// バッファ末尾以降の空行
    EndOfBuffer,
}

/// カラー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Option<Color>,
    /// 背景色
    pub background: Option<Color>,
    /// 修飾子（太字、下線など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground: Some(foreground),
            background: Some(background),
            modifiers: Modifier::empty(),
        }
    }

    /// 色指定なし（端末の既定色）
    pub fn unstyled() -> Self {
        Self {
            foreground: None,
            background: None,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        let mut style = Style::default().add_modifier(self.modifiers);
        if let Some(fg) = self.foreground {
            style = style.fg(fg);
        }
        if let Some(bg) = self.background {
            style = style.bg(bg);
        }
        style
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    /// テーマ名
    pub name: String,
    /// テーマの種類
    pub theme_type: ThemeType,
    /// コンポーネント別のカラー設定
    pub colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    /// 新しいテーマを作成
    pub fn new(name: impl Into<String>, theme_type: ThemeType) -> Self {
        let mut theme = Self {
            name: name.into(),
            theme_type: theme_type.clone(),
            colors: HashMap::new(),
        };
        theme.set_default_colors(&theme_type);
        theme
    }

    pub fn plain() -> Self {
        Self::new("plain", ThemeType::Plain)
    }

    pub fn light() -> Self {
        Self::new("light", ThemeType::Light)
    }

    pub fn dark() -> Self {
        Self::new("dark", ThemeType::Dark)
    }

    /// 名前からテーマを選ぶ（未知の名前はダーク）
    pub fn by_name(name: &str) -> Self {
        match name {
            "plain" => Self::plain(),
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: ComponentType) -> Style {
        self.colors
            .get(&component)
            .map(ColorScheme::to_style)
            .unwrap_or_default()
    }

    /// カラー設定を追加
    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }

    /// スタイルをANSIエスケープ付き文字列に変換
    ///
    /// 既定スタイルの場合はそのまま返す。
    pub fn paint(&self, text: &str, style: Style) -> String {
        if style == Style::default() {
            return text.to_string();
        }
        to_content_style(style).apply(text).to_string()
    }

    fn set_default_colors(&mut self, theme_type: &ThemeType) {
        match theme_type {
            ThemeType::Plain => self.set_plain_colors(),
            ThemeType::Light => self.set_light_colors(),
            ThemeType::Dark => self.set_dark_colors(),
        }
    }

    fn set_plain_colors(&mut self) {
        self.set_color(ComponentType::Cursor,
            ColorScheme::unstyled().with_modifier(Modifier::REVERSED));
    }

    fn set_light_colors(&mut self) {
        self.set_color(ComponentType::Text,
            ColorScheme::new(Color::Black, Color::White));
        self.set_color(ComponentType::LineNumber,
            ColorScheme::new(Color::DarkGray, Color::White));
        self.set_color(ComponentType::Prompt,
            ColorScheme::new(Color::Blue, Color::White).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Cursor,
            ColorScheme::new(Color::White, Color::Blue));
        self.set_color(ComponentType::Placeholder,
            ColorScheme::new(Color::Gray, Color::White).with_modifier(Modifier::ITALIC));
        self.set_color(ComponentType::EndOfBuffer,
            ColorScheme::new(Color::Gray, Color::White));
    }

    fn set_dark_colors(&mut self) {
        self.set_color(ComponentType::Text,
            ColorScheme::new(Color::White, Color::Black));
        self.set_color(ComponentType::LineNumber,
            ColorScheme::new(Color::DarkGray, Color::Black));
        self.set_color(ComponentType::Prompt,
            ColorScheme::new(Color::Cyan, Color::Black).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Cursor,
            ColorScheme::new(Color::Black, Color::White));
        self.set_color(ComponentType::Placeholder,
            ColorScheme::new(Color::DarkGray, Color::Black).with_modifier(Modifier::ITALIC));
        self.set_color(ComponentType::EndOfBuffer,
            ColorScheme::new(Color::DarkGray, Color::Black));
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// ratatuiのスタイルをcrosstermのスタイルへ変換
pub fn to_content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.map(to_crossterm_color);
    content.background_color = style.bg.map(to_crossterm_color);

    let modifier = style.add_modifier - style.sub_modifier;
    let pairs = [
        (Modifier::BOLD, CAttribute::Bold),
        (Modifier::DIM, CAttribute::Dim),
        (Modifier::ITALIC, CAttribute::Italic),
        (Modifier::UNDERLINED, CAttribute::Underlined),
        (Modifier::SLOW_BLINK, CAttribute::SlowBlink),
        (Modifier::RAPID_BLINK, CAttribute::RapidBlink),
        (Modifier::REVERSED, CAttribute::Reverse),
        (Modifier::HIDDEN, CAttribute::Hidden),
        (Modifier::CROSSED_OUT, CAttribute::CrossedOut),
    ];
    for (flag, attribute) in pairs {
        if modifier.contains(flag) {
            content.attributes.set(attribute);
        }
    }
    content
}

fn to_crossterm_color(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    }
}
