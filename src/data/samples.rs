use super::model::{ColumnType, Schema, SchemaError, Table};

// ---------------------------------------------------------------------------
// Built-in STEM sample tables
// ---------------------------------------------------------------------------

/// The sample datasets offered by the data explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleDataset {
    #[default]
    SpaceMissions,
    QuantumExperiments,
    SouthAfricaWeather,
}

/// How the explorer narrows a sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Two sliders, inclusive `low..=high`.
    Range,
    /// One slider, inclusive minimum.
    Threshold,
}

/// Slider description for one sample dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub kind: ControlKind,
    pub column: &'static str,
    pub label: &'static str,
    /// Slider domain.
    pub min: i64,
    pub max: i64,
    /// Initial `(low, high)`; a threshold uses only `low`.
    pub default: (i64, i64),
}

impl SampleDataset {
    pub const ALL: [SampleDataset; 3] = [
        SampleDataset::SpaceMissions,
        SampleDataset::QuantumExperiments,
        SampleDataset::SouthAfricaWeather,
    ];

    /// Label shown in the dataset selector.
    pub fn label(self) -> &'static str {
        match self {
            SampleDataset::SpaceMissions => "Space Missions",
            SampleDataset::QuantumExperiments => "Quantum Experiments",
            SampleDataset::SouthAfricaWeather => "South Africa Weather",
        }
    }

    /// Section heading above the dataset.
    pub fn title(self) -> &'static str {
        match self {
            SampleDataset::SpaceMissions => "🛰 Space Missions",
            SampleDataset::QuantumExperiments => "⚛ Quantum Research",
            SampleDataset::SouthAfricaWeather => "🌦 SA Weather Data",
        }
    }

    pub fn control(self) -> ControlSpec {
        match self {
            SampleDataset::SpaceMissions => ControlSpec {
                kind: ControlKind::Range,
                column: "Altitude (km)",
                label: "Filter by Altitude (km)",
                min: 0,
                max: 2_000_000,
                default: (0, 2_000_000),
            },
            SampleDataset::QuantumExperiments => ControlSpec {
                kind: ControlKind::Threshold,
                column: "Accuracy (%)",
                label: "Minimum Accuracy (%)",
                min: 0,
                max: 100,
                default: (80, 100),
            },
            SampleDataset::SouthAfricaWeather => ControlSpec {
                kind: ControlKind::Range,
                column: "Temp (°C)",
                label: "Temperature Range",
                min: 0,
                max: 40,
                default: (15, 35),
            },
        }
    }

    /// Build the dataset's table.
    pub fn table(self) -> Result<Table, SchemaError> {
        match self {
            SampleDataset::SpaceMissions => Table::parse(
                Schema::new([
                    ("Satellite", ColumnType::Text),
                    ("Altitude (km)", ColumnType::Integer),
                    ("Launch Year", ColumnType::Integer),
                ])?,
                [
                    ["ISS", "408", "1998"],
                    ["Hubble", "547", "1990"],
                    ["JWST", "1500000", "2021"],
                    ["Starlink", "550", "2019"],
                    ["NOAA-19", "870", "2009"],
                ],
            ),
            SampleDataset::QuantumExperiments => Table::parse(
                Schema::new([
                    ("Experiment", ColumnType::Text),
                    ("Accuracy (%)", ColumnType::Integer),
                    ("Date", ColumnType::Date),
                ])?,
                [
                    ["Qubit Test", "91", "2024-01-01"],
                    ["Spin Analysis", "87", "2024-01-02"],
                    ["Wavefunction Sim", "94", "2024-01-03"],
                    ["Noise Study", "82", "2024-01-04"],
                ],
            ),
            SampleDataset::SouthAfricaWeather => Table::parse(
                Schema::new([
                    ("City", ColumnType::Text),
                    ("Temp (°C)", ColumnType::Integer),
                    ("Humidity (%)", ColumnType::Integer),
                ])?,
                [
                    ["Cape Town", "24", "65"],
                    ["Johannesburg", "28", "45"],
                    ["Durban", "26", "70"],
                    ["Pretoria", "30", "40"],
                    ["Bloemfontein", "22", "50"],
                ],
            ),
        }
    }
}

/// All sample tables, built once at startup.
#[derive(Debug, Clone)]
pub struct SampleTables {
    pub space_missions: Table,
    pub quantum_experiments: Table,
    pub south_africa_weather: Table,
}

impl SampleTables {
    pub fn load() -> Result<Self, SchemaError> {
        Ok(Self {
            space_missions: SampleDataset::SpaceMissions.table()?,
            quantum_experiments: SampleDataset::QuantumExperiments.table()?,
            south_africa_weather: SampleDataset::SouthAfricaWeather.table()?,
        })
    }

    pub fn get(&self, dataset: SampleDataset) -> &Table {
        match dataset {
            SampleDataset::SpaceMissions => &self.space_missions,
            SampleDataset::QuantumExperiments => &self.quantum_experiments,
            SampleDataset::SouthAfricaWeather => &self.south_africa_weather,
        }
    }
}
