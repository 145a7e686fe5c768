//! Localized notification text.
//!
//! The key set is a closed enum and every language must answer every key, so
//! a missing translation is a compile error rather than a runtime `None`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Ko,
    Ja,
    En,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ko, Lang::Ja, Lang::En];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ko" => Some(Lang::Ko),
            "ja" => Some(Lang::Ja),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ko => "ko",
            Lang::Ja => "ja",
            Lang::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Fallback text shown by clients that cannot render blocks.
    Notification,
    Title,
    NewCasesHeadline,
    TrendHeadline,
    DailyTitle,
    FieldNewCases,
    FieldDomestic,
    FieldImported,
    FieldCumulative,
    FieldDeaths,
    Footer,
    ChartTitle,
    PlotTitle,
    PlotSeries,
    PlotXLabel,
    PlotYLabel,
}

impl MessageKey {
    pub const ALL: [MessageKey; 16] = [
        MessageKey::Notification,
        MessageKey::Title,
        MessageKey::NewCasesHeadline,
        MessageKey::TrendHeadline,
        MessageKey::DailyTitle,
        MessageKey::FieldNewCases,
        MessageKey::FieldDomestic,
        MessageKey::FieldImported,
        MessageKey::FieldCumulative,
        MessageKey::FieldDeaths,
        MessageKey::Footer,
        MessageKey::ChartTitle,
        MessageKey::PlotTitle,
        MessageKey::PlotSeries,
        MessageKey::PlotXLabel,
        MessageKey::PlotYLabel,
    ];
}

pub fn text(lang: Lang, key: MessageKey) -> &'static str {
    match lang {
        Lang::En => en(key),
        Lang::Ko => ko(key),
        Lang::Ja => ja(key),
    }
}

fn en(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Notification => "Today's COVID-19 Notification in S.Korea",
        MessageKey::Title => "COVID-19 Statistics",
        MessageKey::NewCasesHeadline => ":one: New Cases (Subtotal) : ",
        MessageKey::TrendHeadline => ":two: Daily Trend",
        MessageKey::DailyTitle => ":one: Daily New Cases",
        MessageKey::FieldNewCases => "Subtotal (A+B)",
        MessageKey::FieldDomestic => "Domestic (A)",
        MessageKey::FieldImported => "Inflow (B)",
        MessageKey::FieldCumulative => "Confirmed",
        MessageKey::FieldDeaths => "Death",
        MessageKey::Footer => "<http://ncov.kdca.go.kr/en/|KDCA(English)>",
        MessageKey::ChartTitle => ":two: Chart",
        MessageKey::PlotTitle => "Daily Trend of COVID-19, Republic of Korea",
        MessageKey::PlotSeries => "Confirmed",
        MessageKey::PlotXLabel => "Date",
        MessageKey::PlotYLabel => "Cases",
    }
}

fn ko(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Notification => "오늘의 코로나19 알림",
        MessageKey::Title => "코로나19 발생현황",
        MessageKey::NewCasesHeadline => ":one: 신규확진 (소계) : ",
        MessageKey::TrendHeadline => ":two: 일별 추이",
        MessageKey::DailyTitle => ":one: 신규확진",
        MessageKey::FieldNewCases => "소계 (A+B)",
        MessageKey::FieldDomestic => "국내발생 (A)",
        MessageKey::FieldImported => "해외유입 (B)",
        MessageKey::FieldCumulative => "누적확진",
        MessageKey::FieldDeaths => "사망",
        MessageKey::Footer => "<http://ncov.kdca.go.kr/|KDCA(Korean)>",
        MessageKey::ChartTitle => ":two: 차트",
        MessageKey::PlotTitle => "국내 코로나19 확진 추이",
        MessageKey::PlotSeries => "확진",
        MessageKey::PlotXLabel => "일자",
        MessageKey::PlotYLabel => "확진자 수",
    }
}

fn ja(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Notification => "本日の新型コロナ通知(韓国)",
        MessageKey::Title => "新型コロナ発生状況",
        MessageKey::NewCasesHeadline => ":one: 新規感染 (小計) : ",
        MessageKey::TrendHeadline => ":two: 日別推移",
        MessageKey::DailyTitle => ":one: 新規感染",
        MessageKey::FieldNewCases => "小計 (A+B)",
        MessageKey::FieldDomestic => "国内発生 (A)",
        MessageKey::FieldImported => "海外流入 (B)",
        MessageKey::FieldCumulative => "累計感染",
        MessageKey::FieldDeaths => "死亡",
        MessageKey::Footer => "<http://ncov.kdca.go.kr/en/|KDCA(English)>",
        MessageKey::ChartTitle => ":two: チャート",
        MessageKey::PlotTitle => "韓国の新型コロナ感染推移",
        MessageKey::PlotSeries => "感染",
        MessageKey::PlotXLabel => "日付",
        MessageKey::PlotYLabel => "人数",
    }
}
