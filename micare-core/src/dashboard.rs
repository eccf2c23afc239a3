//! Dashboard state: content views, side menu, map markers, disease chart.
//!
//! Map and chart are kept as plain data. Rendering belongs to the front end.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Home,
    Map,
    Analytics,
    Wallet,
    Engagement,
}

impl DashboardView {
    pub const ALL: [DashboardView; 5] = [
        DashboardView::Home,
        DashboardView::Map,
        DashboardView::Analytics,
        DashboardView::Wallet,
        DashboardView::Engagement,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DashboardView::Home => "home",
            DashboardView::Map => "map",
            DashboardView::Analytics => "analytics",
            DashboardView::Wallet => "wallet",
            DashboardView::Engagement => "engagement",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardView::Home => "Home",
            DashboardView::Map => "Health Map",
            DashboardView::Analytics => "Analytics",
            DashboardView::Wallet => "Wallet",
            DashboardView::Engagement => "Engagement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomNav {
    Home,
    WalletBottom,
    Engagement,
    Profile,
}

impl BottomNav {
    pub const ALL: [BottomNav; 4] = [
        BottomNav::Home,
        BottomNav::WalletBottom,
        BottomNav::Engagement,
        BottomNav::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BottomNav::Home => "Home",
            BottomNav::WalletBottom => "Wallet",
            BottomNav::Engagement => "Chat",
            BottomNav::Profile => "Profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Facility,
    Hotspot,
    Emergency,
}

impl MarkerKind {
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Facility => "facility",
            MarkerKind::Hotspot => "hotspot",
            MarkerKind::Emergency => "emergency",
        }
    }

    /// Marker colour as RGB.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            MarkerKind::Hotspot => (0xe7, 0x4c, 0x3c),
            MarkerKind::Emergency => (0xf3, 0x9c, 0x12),
            MarkerKind::Facility => (0x34, 0x98, 0xdb),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub kind: MarkerKind,
    pub title: &'static str,
}

pub const MAP_CENTER: (f64, f64) = (-1.2921, 36.8219);
pub const MAP_DEFAULT_ZOOM: u8 = 13;
const MAP_MIN_ZOOM: u8 = 3;
const MAP_MAX_ZOOM: u8 = 18;

pub fn sample_markers() -> Vec<MapMarker> {
    vec![
        MapMarker {
            lat: -1.2921,
            lng: 36.8219,
            kind: MarkerKind::Facility,
            title: "MI_CARE Main Hospital",
        },
        MapMarker {
            lat: -1.2850,
            lng: 36.8150,
            kind: MarkerKind::Hotspot,
            title: "Influenza Hotspot",
        },
        MapMarker {
            lat: -1.3000,
            lng: 36.8300,
            kind: MarkerKind::Emergency,
            title: "Emergency Response",
        },
        MapMarker {
            lat: -1.2800,
            lng: 36.8100,
            kind: MarkerKind::Facility,
            title: "Pharmacy #123",
        },
    ]
}

/// Map widget state. Created once; later entries only refresh its size.
#[derive(Debug, Clone)]
pub struct MapState {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    pub refreshes: usize,
    pub analytics_open: bool,
}

impl MapState {
    fn create() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_DEFAULT_ZOOM,
            markers: sample_markers(),
            refreshes: 0,
            analytics_open: false,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAP_MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MAP_MIN_ZOOM);
    }

    /// Half-width of the visible area in degrees at the current zoom.
    pub fn span_degrees(&self) -> f64 {
        0.02 * 2f64.powi(MAP_DEFAULT_ZOOM as i32 - self.zoom as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    SixMonths,
    SevenDays,
    ThirtyDays,
    NinetyDays,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::SixMonths,
        DateRange::SevenDays,
        DateRange::ThirtyDays,
        DateRange::NinetyDays,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DateRange::SixMonths => "6m",
            DateRange::SevenDays => "7d",
            DateRange::ThirtyDays => "30d",
            DateRange::NinetyDays => "90d",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disease {
    Influenza,
    Malaria,
    Covid19,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Influenza, Disease::Malaria, Disease::Covid19];

    pub fn label(self) -> &'static str {
        match self {
            Disease::Influenza => "Influenza Cases",
            Disease::Malaria => "Malaria Cases",
            Disease::Covid19 => "COVID-19 Cases",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Disease::Influenza => (0xe7, 0x4c, 0x3c),
            Disease::Malaria => (0x34, 0x98, 0xdb),
            Disease::Covid19 => (0x2e, 0xcc, 0x71),
        }
    }

    fn six_month_data(self) -> [u32; 6] {
        match self {
            Disease::Influenza => [65, 59, 80, 81, 56, 55],
            Disease::Malaria => [28, 48, 40, 19, 86, 27],
            Disease::Covid19 => [12, 15, 18, 14, 11, 13],
        }
    }

    fn seven_day_data(self) -> [u32; 7] {
        match self {
            Disease::Influenza => [5, 6, 7, 8, 9, 10, 11],
            Disease::Malaria => [3, 4, 5, 6, 7, 8, 9],
            Disease::Covid19 => [1, 2, 2, 3, 2, 1, 2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiseaseFilter {
    #[default]
    All,
    Only(Disease),
}

impl DiseaseFilter {
    pub fn next(self) -> Self {
        match self {
            DiseaseFilter::All => DiseaseFilter::Only(Disease::Influenza),
            DiseaseFilter::Only(Disease::Influenza) => DiseaseFilter::Only(Disease::Malaria),
            DiseaseFilter::Only(Disease::Malaria) => DiseaseFilter::Only(Disease::Covid19),
            DiseaseFilter::Only(Disease::Covid19) => DiseaseFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiseaseFilter::All => "all",
            DiseaseFilter::Only(d) => d.label(),
        }
    }

    fn includes(self, disease: Disease) -> bool {
        match self {
            DiseaseFilter::All => true,
            DiseaseFilter::Only(d) => d == disease,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub disease: Disease,
    pub values: Vec<u32>,
}

pub const CHART_TITLE: &str = "Disease Trends (Last 6 Months)";
pub const MONTH_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Disease trend chart. Every rebuild is a new generation.
#[derive(Debug, Clone)]
pub struct DiseaseChart {
    pub range: DateRange,
    pub filter: DiseaseFilter,
    pub series: Vec<Series>,
    pub generation: u64,
    seed: u64,
}

impl DiseaseChart {
    pub fn new(seed: u64) -> Self {
        let mut chart = Self {
            range: DateRange::SixMonths,
            filter: DiseaseFilter::All,
            series: Vec::new(),
            generation: 0,
            seed,
        };
        chart.rebuild();
        chart
    }

    /// Destroy the current series and build them again from the filters.
    pub fn rebuild(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed ^ self.generation);
        self.series = Disease::ALL
            .into_iter()
            .filter(|d| self.filter.includes(*d))
            .map(|disease| Series {
                disease,
                values: match self.range {
                    DateRange::SixMonths => disease.six_month_data().to_vec(),
                    DateRange::SevenDays => disease.seven_day_data().to_vec(),
                    DateRange::ThirtyDays => random_series(&mut rng, 30),
                    DateRange::NinetyDays => random_series(&mut rng, 90),
                },
            })
            .collect();
        self.generation += 1;
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.rebuild();
    }

    pub fn set_filter(&mut self, filter: DiseaseFilter) {
        self.filter = filter;
        self.rebuild();
    }

    pub fn max_value(&self) -> u32 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

fn random_series(rng: &mut StdRng, len: usize) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..100)).collect()
}

/// Everything on the dashboard screen apart from session data.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub view: DashboardView,
    pub bottom_nav: BottomNav,
    pub side_menu_open: bool,
    pub search_open: bool,
    pub map: Option<MapState>,
    pub chart: Option<DiseaseChart>,
    chart_seed: u64,
}

impl DashboardState {
    pub fn new(chart_seed: u64) -> Self {
        Self {
            view: DashboardView::Home,
            bottom_nav: BottomNav::Home,
            side_menu_open: false,
            search_open: false,
            map: None,
            chart: None,
            chart_seed,
        }
    }

    /// Create the map on first use; afterwards only refresh it.
    pub fn init_map(&mut self) {
        match &mut self.map {
            Some(map) => map.refreshes += 1,
            None => self.map = Some(MapState::create()),
        }
    }

    /// Drop any existing chart and create a fresh one with default filters.
    pub fn init_chart(&mut self) {
        match &mut self.chart {
            Some(chart) => {
                chart.range = DateRange::SixMonths;
                chart.filter = DiseaseFilter::All;
                chart.rebuild();
            }
            None => self.chart = Some(DiseaseChart::new(self.chart_seed)),
        }
    }

    pub fn select_view(&mut self, view: DashboardView) {
        self.view = view;
        if view == DashboardView::Map {
            self.init_map();
        }
    }

    pub fn select_bottom(&mut self, nav: BottomNav) {
        self.bottom_nav = nav;
        if nav == BottomNav::WalletBottom {
            self.view = DashboardView::Wallet;
        }
    }

    pub fn toggle_side_menu(&mut self) {
        self.side_menu_open = !self.side_menu_open;
    }

    /// A click landed outside the side menu and its toggle.
    pub fn click_outside_menu(&mut self) {
        self.side_menu_open = false;
    }
}
