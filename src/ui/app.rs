//! Main application UI.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::data::call_center::ContactForm;
use crate::data::drivers::{self, DriverSort};
use crate::data::finance::daily_in_range;
use crate::data::parcels::{self, ParcelSearchQuery, SystemParcelFilter};
use crate::data::seed;
use crate::data::shelves;
use crate::data::users::UserFilter;
use crate::error::{AppError, Result};
use crate::export::{self, ExportFormat};
use crate::models::call_center::CallParcel;
use crate::models::finance::{
    DailyFinancial, DriverPayment, FinancialSummary, PaymentStatus, ReconciliationEntry, StationFinancial,
    StationPerformance, StatusCount, SystemMetrics,
};
use crate::models::parcel::Parcel;
use crate::models::shelf::Shelf;
use crate::models::station::{CreateLocation, CreateStation, Location, ServiceResponse, Station};
use crate::models::user::{CreateUser, User, UserRole};
use crate::registration::{BulkStartForm, CostsForm, IntakeForm, RegistrationWizard};
use crate::services::LocationService;
use crate::session::{AppSession, StationContext};

use super::components::{colors, parse_flexible_date};
use super::{
    admin_dashboard, call_center_panel, dashboard, deliveries_panel, driver_payments_panel, financial_dashboard,
    financial_reports_panel, parcel_overview_panel, parcel_search_panel, reconciliation_panel, registration_panel,
    shelf_panel, station_panel, user_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Registration,
    ParcelSearch,
    CallCenter,
    Shelves,
    Deliveries,
    Reconciliation,
    FinancialDashboard,
    AdminDashboard,
    Stations,
    Users,
    ParcelOverview,
    FinancialReports,
    DriverPayments,
}

impl Panel {
    /// Station-level screens, in menu order.
    pub const STATION: [Panel; 7] = [
        Panel::Registration,
        Panel::ParcelSearch,
        Panel::CallCenter,
        Panel::Shelves,
        Panel::Deliveries,
        Panel::Reconciliation,
        Panel::FinancialDashboard,
    ];

    /// System-wide screens, in menu order.
    pub const ADMIN: [Panel; 6] = [
        Panel::AdminDashboard,
        Panel::Stations,
        Panel::Users,
        Panel::ParcelOverview,
        Panel::FinancialReports,
        Panel::DriverPayments,
    ];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Registration => "Parcel Registration",
            Panel::ParcelSearch => "Parcel Search",
            Panel::CallCenter => "Call Center",
            Panel::Shelves => "Shelf Management",
            Panel::Deliveries => "Package Assignments",
            Panel::Reconciliation => "Reconciliation",
            Panel::FinancialDashboard => "Financial Dashboard",
            Panel::AdminDashboard => "Admin Dashboard",
            Panel::Stations => "Station Management",
            Panel::Users => "User Management",
            Panel::ParcelOverview => "System Parcel Overview",
            Panel::FinancialReports => "Financial Reports",
            Panel::DriverPayments => "Driver Payments",
        }
    }

    /// One-line description shown under the title.
    pub fn description(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Overview of station activity",
            Panel::Registration => "Register single parcels or bulk driver drop-offs",
            Panel::ParcelSearch => "Find parcels by recipient, phone, status or shelf",
            Panel::CallCenter => "Contact recipients and record delivery preferences",
            Panel::Shelves => "Organize storage slots at this station",
            Panel::Deliveries => "Assign ready parcels to riders and track active deliveries",
            Panel::Reconciliation => "Confirm cash collected by riders",
            Panel::FinancialDashboard => "Station earnings and rider breakdown",
            Panel::AdminDashboard => "System-wide metrics across all stations",
            Panel::Stations => "Create and manage stations and locations",
            Panel::Users => "Manage console users and roles",
            Panel::ParcelOverview => "Every parcel across all stations",
            Panel::FinancialReports => "Daily and per-station revenue reports",
            Panel::DriverPayments => "Rider earnings, payouts and balances",
        }
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    StationsLoaded(Vec<Station>),
    LocationsLoaded(Vec<Location>),
    LoadError(String),
    LocationCreated(String, ServiceResponse),
    StationCreated(String, ServiceResponse),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Short-lived notification in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    Shelf(String, String),
}

/// Form state for creating a location.
#[derive(Default, Clone)]
pub struct LocationForm {
    pub name: String,
    pub country: String,
    pub region: String,
    pub is_open: bool,
}

impl LocationForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open() -> Self {
        Self {
            country: "Ghana".to_string(),
            is_open: true,
            ..Default::default()
        }
    }

    pub fn to_request(&self) -> Result<CreateLocation> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Location name is required"));
        }
        if self.country.trim().is_empty() {
            return Err(AppError::validation("Country is required"));
        }
        Ok(CreateLocation {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            region: self.region.trim().to_string(),
        })
    }
}

/// Form state for creating a station.
#[derive(Default, Clone)]
pub struct StationForm {
    pub name: String,
    pub address: String,
    pub location_id: Option<String>,
    pub manager_id: Option<String>,
    pub is_open: bool,
}

impl StationForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<CreateStation> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Station name is required"));
        }
        let location_id = self
            .location_id
            .clone()
            .ok_or_else(|| AppError::validation("Select a location"))?;
        Ok(CreateStation {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            location_id,
            manager_id: self.manager_id.clone(),
        })
    }
}

/// Form state for adding a user.
#[derive(Clone)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub station_id: Option<String>,
    pub is_open: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: UserRole::FrontDesk,
            station_id: None,
            is_open: false,
        }
    }
}

impl UserForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the request, resolving the station name from `stations`.
    pub fn to_request(&self, stations: &[Station]) -> Result<CreateUser> {
        let station = self
            .station_id
            .as_ref()
            .and_then(|id| stations.iter().find(|s| &s.id == id))
            .ok_or_else(|| AppError::validation("Station is required"))?;
        Ok(CreateUser {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            station_id: station.id.clone(),
            station: station.name.clone(),
        })
    }
}

/// Payout dialog state.
#[derive(Default, Clone)]
pub struct PaymentForm {
    pub driver_id: String,
    pub driver_name: String,
    pub outstanding: f64,
    pub amount: String,
    pub is_open: bool,
}

impl PaymentForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pre-fill with the full outstanding balance.
    pub fn for_driver(driver: &DriverPayment) -> Self {
        Self {
            driver_id: driver.id.clone(),
            driver_name: driver.name.clone(),
            outstanding: driver.outstanding_balance,
            amount: format!("{:.2}", driver.outstanding_balance),
            is_open: true,
        }
    }
}

/// Operator switch dialog state.
#[derive(Default, Clone)]
pub struct OperatorForm {
    pub user_id: Option<String>,
    pub station_id: Option<String>,
    pub is_open: bool,
}

/// Financial report view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    #[default]
    Daily,
    Station,
}

/// Filter state for financial reports.
#[derive(Default, Clone)]
pub struct ReportFilter {
    pub view: ReportView,
    pub start_date_input: String,
    pub end_date_input: String,
}

impl ReportFilter {
    /// Daily rows inside the typed range. Unparseable bounds are open.
    pub fn daily_rows(&self, days: &[DailyFinancial]) -> Vec<DailyFinancial> {
        daily_in_range(
            days,
            parse_flexible_date(&self.start_date_input),
            parse_flexible_date(&self.end_date_input),
        )
    }
}

/// Main application state.
pub struct App {
    // Runtime and services
    pub rt: tokio::runtime::Runtime,
    pub location_service: Arc<dyn LocationService>,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,

    // Session
    pub session: AppSession,
    pub config: AppConfig,

    // Station data
    pub parcels: Vec<Parcel>,
    pub call_queue: Vec<CallParcel>,
    pub shelves: Vec<Shelf>,
    pub users: Vec<User>,
    pub drivers: Vec<DriverPayment>,
    pub daily_financials: Vec<DailyFinancial>,
    pub station_financials: Vec<StationFinancial>,
    pub financial_summary: FinancialSummary,
    pub system_metrics: SystemMetrics,
    pub station_performance: Vec<StationPerformance>,
    pub status_counts: Vec<StatusCount>,
    pub reconciliations: Vec<ReconciliationEntry>,

    // Service-backed data
    pub stations: Vec<Station>,
    pub locations: Vec<Location>,
    pub is_loading: bool,

    // Registration
    pub wizard: RegistrationWizard,
    pub intake_form: IntakeForm,
    pub bulk_form: BulkStartForm,
    pub costs_form: CostsForm,

    // Parcel search
    pub search_query: ParcelSearchQuery,
    pub search_start_input: String,
    pub search_end_input: String,
    pub quick_search: String,

    // Call center
    pub selected_call: Option<String>,
    pub contact_form: ContactForm,

    // Shelves
    pub new_shelf_name: String,

    // Assignments and reconciliation
    pub assignment_selection: Vec<String>,
    pub assignment_rider: Option<String>,
    pub reconcile_rider: Option<String>,
    pub reconcile_collected: String,

    // Admin
    pub location_form: LocationForm,
    pub station_form: StationForm,
    pub user_form: UserForm,
    pub user_filter: UserFilter,
    pub overview_filter: SystemParcelFilter,
    pub overview_from_input: String,
    pub overview_to_input: String,
    pub report_filter: ReportFilter,
    pub driver_status_filter: Option<PaymentStatus>,
    pub driver_sort: DriverSort,
    pub payment_form: PaymentForm,

    // Notifications
    pub toasts: Vec<Toast>,
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub operator_form: OperatorForm,
}

impl App {
    pub fn new(
        config: AppConfig,
        rt: tokio::runtime::Runtime,
        location_service: Arc<dyn LocationService>,
        startup_error: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = AppSession::from_config(&config.operator);

        let mut app = Self {
            rt,
            location_service,
            tx,
            rx,
            current_panel: Panel::default(),
            session,
            config,
            parcels: seed::parcels(),
            call_queue: seed::call_queue(),
            shelves: seed::shelves(),
            users: seed::users(),
            drivers: seed::driver_payments(),
            daily_financials: seed::daily_financials(),
            station_financials: seed::station_financials(),
            financial_summary: seed::financial_summary(),
            system_metrics: seed::system_metrics(),
            station_performance: seed::station_performance(),
            status_counts: seed::status_counts(),
            reconciliations: Vec::new(),
            stations: Vec::new(),
            locations: Vec::new(),
            is_loading: false,
            wizard: RegistrationWizard::new(),
            intake_form: IntakeForm::default(),
            bulk_form: BulkStartForm::default(),
            costs_form: CostsForm::default(),
            search_query: ParcelSearchQuery::default(),
            search_start_input: String::new(),
            search_end_input: String::new(),
            quick_search: String::new(),
            selected_call: None,
            contact_form: ContactForm::default(),
            new_shelf_name: String::new(),
            assignment_selection: Vec::new(),
            assignment_rider: None,
            reconcile_rider: None,
            reconcile_collected: String::new(),
            location_form: LocationForm::default(),
            station_form: StationForm::default(),
            user_form: UserForm::default(),
            user_filter: UserFilter::default(),
            overview_filter: SystemParcelFilter::default(),
            overview_from_input: String::new(),
            overview_to_input: String::new(),
            report_filter: ReportFilter::default(),
            driver_status_filter: None,
            driver_sort: DriverSort::default(),
            payment_form: PaymentForm::default(),
            toasts: Vec::new(),
            log_messages: Vec::new(),
            show_delete_confirm: false,
            delete_target: None,
            error_message: startup_error,
            success_message: None,
            operator_form: OperatorForm::default(),
        };

        app.log_info(format!("Signed in as {}", app.session.user_name()));
        app.refresh_stations();

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Queue a toast and mirror it into the activity log.
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        match kind {
            ToastKind::Success => self.log_success(message.clone()),
            ToastKind::Error => self.log_error(message.clone()),
        }
        self.toasts.push(Toast {
            message,
            kind,
            created: Instant::now(),
        });
    }

    /// Show a validation or data error as an error toast.
    pub fn toast_error(&mut self, err: &AppError) {
        tracing::warn!("{}", err);
        self.show_toast(err.user_message(), ToastKind::Error);
    }

    pub fn currency(&self) -> &str {
        &self.config.ui.currency
    }

    /// Load stations and locations from the station service.
    pub fn refresh_stations(&mut self) {
        let service = Arc::clone(&self.location_service);
        let tx = self.tx.clone();
        self.is_loading = true;

        self.rt.spawn(async move {
            match service.list_locations().await {
                Ok(locations) => {
                    let _ = tx.send(UiMessage::LocationsLoaded(locations));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.user_message()));
                }
            }
            match service.list_stations().await {
                Ok(stations) => {
                    let _ = tx.send(UiMessage::StationsLoaded(stations));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::LoadError(e.user_message()));
                }
            }
        });
    }

    /// Create a location, then refresh on success.
    pub fn create_location(&mut self, data: CreateLocation) {
        let service = Arc::clone(&self.location_service);
        let tx = self.tx.clone();
        let name = data.name.clone();

        self.rt.spawn(async move {
            let response = match service.create_location(data).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Create location failed: {}", e);
                    ServiceResponse {
                        success: false,
                        message: None,
                    }
                }
            };
            let _ = tx.send(UiMessage::LocationCreated(name, response));
        });
    }

    /// Create a station, then refresh on success.
    pub fn create_station(&mut self, data: CreateStation) {
        let service = Arc::clone(&self.location_service);
        let tx = self.tx.clone();
        let name = data.name.clone();

        self.rt.spawn(async move {
            let response = match service.create_station(data).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Create station failed: {}", e);
                    ServiceResponse {
                        success: false,
                        message: None,
                    }
                }
            };
            let _ = tx.send(UiMessage::StationCreated(name, response));
        });
    }

    /// Resolve the destination and run `write`, reporting the outcome.
    fn run_export(&mut self, prefix: &str, format: ExportFormat, write: impl FnOnce(&Path) -> Result<()>) {
        let filename = export::generate_export_filename(prefix, format);
        let Some(path) = export::resolve_export_path(&self.config.export, &filename, format) else {
            self.log_info("Export cancelled");
            return;
        };

        match write(&path) {
            Ok(()) => {
                tracing::info!("Exported {}", path.display());
                self.show_toast(format!("Exported to {}", path.display()), ToastKind::Success);
            }
            Err(e) => {
                tracing::error!("Export to {} failed: {}", path.display(), e);
                self.show_toast(format!("Export failed: {}", e.user_message()), ToastKind::Error);
            }
        }
    }

    /// Export the current parcel search results to CSV.
    pub fn export_parcel_search(&mut self) {
        let results = parcels::search(&self.parcels, &self.search_query);
        let csv = export::to_csv(&export::PARCEL_SEARCH_HEADERS, &export::parcel_search_rows(&results));
        self.run_export("parcel_search", ExportFormat::Csv, |path| export::write_csv(&csv, path));
    }

    /// Export the filtered system overview to CSV.
    pub fn export_parcel_overview(&mut self) {
        let results = self.overview_filter.apply(&self.parcels);
        let csv = export::to_csv(&export::PARCEL_OVERVIEW_HEADERS, &export::parcel_overview_rows(&results));
        self.run_export("parcel_overview", ExportFormat::Csv, |path| export::write_csv(&csv, path));
    }

    /// Export the filtered, sorted driver table to Excel.
    pub fn export_driver_payments(&mut self) {
        let rows: Vec<DriverPayment> = drivers::filter_and_sort(&self.drivers, self.driver_status_filter, self.driver_sort)
            .into_iter()
            .cloned()
            .collect();
        self.run_export("driver_payments", ExportFormat::Excel, |path| {
            let refs: Vec<&DriverPayment> = rows.iter().collect();
            export::export_driver_payments_to_excel(&refs, path)?;
            Ok(())
        });
    }

    /// Export both financial views to Excel.
    pub fn export_financial_report(&mut self) {
        let daily = self.report_filter.daily_rows(&self.daily_financials);
        let stations = self.station_financials.clone();
        self.run_export("financial_report", ExportFormat::Excel, |path| {
            export::export_financial_report_to_excel(&daily, &stations, path)?;
            Ok(())
        });
    }

    /// Submit the registration wizard and add the parcels to the station list.
    pub fn submit_registration(&mut self) {
        let Some(batch) = self.wizard.submit() else {
            self.show_toast("No bulk session data available", ToastKind::Error);
            return;
        };

        let station = self
            .session
            .current_station()
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let registered = batch.to_parcels(&station, Local::now().date_naive());
        let count = registered.len();
        shelves::record_intake(&mut self.shelves, &registered);
        self.parcels.extend(registered);

        self.intake_form.reset();
        self.bulk_form.reset();
        self.costs_form.reset();

        let message = match &batch.driver {
            Some((driver, _)) => format!("{count} parcel(s) from {driver} registered"),
            None => "Parcel registered".to_string(),
        };
        self.show_toast(message, ToastKind::Success);
    }

    /// Apply the operator switch dialog.
    ///
    /// The chosen user and station are checked together before the session
    /// changes. A rejected switch keeps the dialog open.
    fn apply_operator_switch(&mut self) {
        let form = self.operator_form.clone();
        let user = form
            .user_id
            .as_ref()
            .and_then(|id| self.users.iter().find(|u| &u.id == id))
            .cloned();
        let station = form
            .station_id
            .as_ref()
            .and_then(|id| self.stations.iter().find(|s| &s.id == id))
            .map(|s| self.station_context(s));

        let result = match (user, station) {
            (Some(user), Some(station)) => self
                .session
                .switch_operator(&user, station.clone())
                .map(|()| format!("Signed in as {} ({}) at {}", user.name, user.role.label(), station.name)),
            (Some(user), None) => match self.session.current_station().cloned() {
                Some(current) => self
                    .session
                    .switch_operator(&user, current)
                    .map(|()| format!("Signed in as {} ({})", user.name, user.role.label())),
                None => {
                    self.session.login(&user);
                    Ok(format!("Signed in as {} ({})", user.name, user.role.label()))
                }
            },
            (None, Some(station)) => {
                if self.session.can_access_station(&station.id) {
                    let message = format!("Switched to {}", station.name);
                    self.session.switch_station(station);
                    Ok(message)
                } else {
                    Err(AppError::validation(format!(
                        "{} cannot access {}",
                        self.session.user_name(),
                        station.name
                    )))
                }
            }
            (None, None) => Ok(String::new()),
        };

        match result {
            Ok(message) => {
                if !message.is_empty() {
                    self.log_info(message);
                }
                self.operator_form = OperatorForm::default();
            }
            Err(e) => self.toast_error(&e),
        }
    }

    fn station_context(&self, station: &Station) -> StationContext {
        let location = self
            .locations
            .iter()
            .find(|l| l.id == station.location_id)
            .map(|l| l.name.clone())
            .unwrap_or_default();
        StationContext {
            id: station.id.clone(),
            name: station.name.clone(),
            location,
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::StationsLoaded(stations) => {
                    self.stations = stations;
                    self.is_loading = false;
                }
                UiMessage::LocationsLoaded(locations) => {
                    self.locations = locations;
                }
                UiMessage::LoadError(e) => {
                    tracing::error!("Station service: {}", e);
                    self.is_loading = false;
                    self.show_toast(e, ToastKind::Error);
                }
                UiMessage::LocationCreated(name, response) => {
                    if response.success {
                        self.location_form.reset();
                        self.show_toast(format!("Location '{name}' created"), ToastKind::Success);
                        self.refresh_stations();
                    } else {
                        let message = response
                            .message
                            .unwrap_or_else(|| "Failed to create location".to_string());
                        tracing::error!("Create location '{}' rejected: {}", name, message);
                        self.show_toast(message, ToastKind::Error);
                    }
                }
                UiMessage::StationCreated(name, response) => {
                    if response.success {
                        self.station_form.reset();
                        self.show_toast(format!("Station '{name}' created"), ToastKind::Success);
                        self.refresh_stations();
                    } else {
                        let message = response
                            .message
                            .unwrap_or_else(|| "Failed to create station".to_string());
                        tracing::error!("Create station '{}' rejected: {}", name, message);
                        self.show_toast(message, ToastKind::Error);
                    }
                }
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Station", |ui| {
                    if ui.button(Panel::Dashboard.name()).clicked() {
                        self.current_panel = Panel::Dashboard;
                        ui.close();
                    }
                    ui.separator();
                    for panel in Panel::STATION {
                        if ui.button(panel.name()).clicked() {
                            self.current_panel = panel;
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Admin", |ui| {
                    for panel in Panel::ADMIN {
                        if ui.button(panel.name()).clicked() {
                            self.current_panel = panel;
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Operator", |ui| {
                    if ui.button("Switch Operator...").clicked() {
                        self.operator_form = OperatorForm {
                            user_id: self.session.current_user().map(|u| u.id.clone()),
                            station_id: self.session.current_station().map(|s| s.id.clone()),
                            is_open: true,
                        };
                        ui.close();
                    }
                    if ui.button("Clear Activity Log").clicked() {
                        self.log_messages.clear();
                        ui.close();
                    }
                });
            });
        });

        egui::TopBottomPanel::top("route_title").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.current_panel.name()).strong());
                ui.label(RichText::new(self.current_panel.description()).weak());
            });
            ui.add_space(4.0);
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    match self.session.current_user() {
                        Some(user) => {
                            ui.label(format!("{} ({})", user.name, user.role.label()));
                        }
                        None => {
                            ui.colored_label(colors::WARNING, "Not signed in");
                        }
                    }
                    ui.separator();
                    match self.session.current_station() {
                        Some(station) => ui.label(format!("{} - {}", station.name, station.location)),
                        None => ui.label("No station"),
                    };

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_loading {
                            ui.spinner();
                        }
                        ui.label(format!("{} stations", self.stations.len()));
                    });
                });
            });
    }

    /// Render the operator switch dialog.
    fn show_operator_dialog(&mut self, ctx: &egui::Context) {
        if !self.operator_form.is_open {
            return;
        }

        let mut open = true;
        let mut apply = false;
        egui::Window::new("Switch Operator")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("operator_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("User:");
                        egui::ComboBox::from_id_salt("operator_user")
                            .width(220.0)
                            .selected_text(
                                self.operator_form
                                    .user_id
                                    .as_ref()
                                    .and_then(|id| self.users.iter().find(|u| &u.id == id))
                                    .map(|u| u.name.as_str())
                                    .unwrap_or("Select..."),
                            )
                            .show_ui(ui, |ui| {
                                for user in &self.users {
                                    let label = format!("{} ({})", user.name, user.role.label());
                                    if ui
                                        .selectable_label(self.operator_form.user_id.as_ref() == Some(&user.id), label)
                                        .clicked()
                                    {
                                        self.operator_form.user_id = Some(user.id.clone());
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Station:");
                        egui::ComboBox::from_id_salt("operator_station")
                            .width(220.0)
                            .selected_text(
                                self.operator_form
                                    .station_id
                                    .as_ref()
                                    .and_then(|id| self.stations.iter().find(|s| &s.id == id))
                                    .map(|s| s.name.as_str())
                                    .unwrap_or("Current"),
                            )
                            .show_ui(ui, |ui| {
                                for station in &self.stations {
                                    if ui
                                        .selectable_label(
                                            self.operator_form.station_id.as_ref() == Some(&station.id),
                                            &station.name,
                                        )
                                        .clicked()
                                    {
                                        self.operator_form.station_id = Some(station.id.clone());
                                    }
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.operator_form.is_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Apply").clicked() {
                            apply = true;
                        }
                    });
                });
            });

        if apply {
            self.apply_operator_switch();
        } else if !open {
            self.operator_form.is_open = false;
        }
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(ref target) = self.delete_target.clone()
        {
            let (title, message) = match target {
                DeleteTarget::Shelf(_, name) => ("Delete Shelf", format!("Delete shelf '{}'?", name)),
            };

            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Shelf(id, name) => {
                    match shelves::delete(&mut self.shelves, &self.parcels, &id, &self.session) {
                        Ok(_) => self.show_toast(format!("Shelf '{name}' deleted"), ToastKind::Success),
                        Err(e) => self.toast_error(&e),
                    }
                }
            }
        }
    }

    /// Drop expired toasts and draw the rest.
    fn show_toasts(&mut self, ctx: &egui::Context) {
        let lifetime = Duration::from_secs(self.config.ui.toast_seconds);
        self.toasts.retain(|t| t.created.elapsed() < lifetime);
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -40.0])
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let color = match toast.kind {
                        ToastKind::Success => colors::SUCCESS,
                        ToastKind::Error => colors::ERROR,
                    };
                    egui::Frame::new()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .stroke(egui::Stroke::new(1.0, color))
                        .inner_margin(egui::Margin::same(10))
                        .corner_radius(egui::CornerRadius::same(6))
                        .show(ui, |ui| {
                            ui.colored_label(color, &toast.message);
                        });
                    ui.add_space(6.0);
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_operator_dialog(ctx);
        self.show_dialogs(ctx);
        self.show_toasts(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            let go_back = match self.current_panel {
                Panel::Dashboard => {
                    if let Some(next) = dashboard::show(self, ui) {
                        self.current_panel = next;
                    }
                    false
                }
                Panel::Registration => registration_panel::show(self, ui),
                Panel::ParcelSearch => parcel_search_panel::show(self, ui),
                Panel::CallCenter => call_center_panel::show(self, ui),
                Panel::Shelves => shelf_panel::show(self, ui),
                Panel::Deliveries => deliveries_panel::show(self, ui),
                Panel::Reconciliation => reconciliation_panel::show(self, ui),
                Panel::FinancialDashboard => financial_dashboard::show(self, ui),
                Panel::AdminDashboard => {
                    if let Some(next) = admin_dashboard::show(self, ui) {
                        self.current_panel = next;
                    }
                    false
                }
                Panel::Stations => station_panel::show(self, ui),
                Panel::Users => user_panel::show(self, ui),
                Panel::ParcelOverview => parcel_overview_panel::show(self, ui),
                Panel::FinancialReports => financial_reports_panel::show(self, ui),
                Panel::DriverPayments => driver_payments_panel::show(self, ui),
            };
            if go_back {
                self.current_panel = Panel::Dashboard;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;
    use crate::models::registration::ParcelDraft;

    #[test]
    fn test_every_panel_has_a_title() {
        let all = std::iter::once(Panel::Dashboard)
            .chain(Panel::STATION)
            .chain(Panel::ADMIN);
        for panel in all {
            assert!(!panel.name().is_empty());
            assert!(!panel.description().is_empty());
        }
    }

    #[test]
    fn test_station_form_requires_location() {
        let form = StationForm {
            name: "Ho Depot".to_string(),
            ..Default::default()
        };
        assert!(form.to_request().is_err());

        let form = StationForm {
            location_id: Some("LOC-001".to_string()),
            ..form
        };
        assert_eq!(form.to_request().unwrap().location_id, "LOC-001");
    }

    #[test]
    fn test_location_form_trims() {
        let form = LocationForm {
            name: "  Ho ".to_string(),
            region: "Volta".to_string(),
            ..LocationForm::open()
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.name, "Ho");
        assert_eq!(req.country, "Ghana");
    }

    #[test]
    fn test_user_form_resolves_station_name() {
        let stations = vec![Station {
            id: "STATION-002".to_string(),
            name: "Kumasi Hub".to_string(),
            code: "KUM-001".to_string(),
            address: String::new(),
            location_id: "LOC-002".to_string(),
            manager_id: None,
        }];
        let form = UserForm {
            name: "Esi".to_string(),
            station_id: Some("STATION-002".to_string()),
            ..Default::default()
        };
        assert_eq!(form.to_request(&stations).unwrap().station, "Kumasi Hub");
        assert!(UserForm::default().to_request(&stations).is_err());
    }

    #[test]
    fn test_report_filter_ignores_bad_dates() {
        let days = seed::daily_financials();
        let filter = ReportFilter {
            start_date_input: "2024-01-17".to_string(),
            end_date_input: "not a date".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.daily_rows(&days).len(), 4);
    }

    #[test]
    fn test_payment_form_prefills_outstanding() {
        let drivers = seed::driver_payments();
        let form = PaymentForm::for_driver(&drivers[1]);
        assert_eq!(form.amount, "300.00");
        assert!(form.is_open);
    }

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            code: id.to_string(),
            address: String::new(),
            location_id: String::new(),
            manager_id: None,
        }
    }

    fn test_app() -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let service: Arc<dyn LocationService> = Arc::new(crate::services::MockLocationService::seeded());
        let mut app = App::new(AppConfig::default(), rt, service, None);
        app.stations = vec![
            station("STATION-001", "Accra Central Station"),
            station("STATION-002", "Kumasi Hub"),
        ];
        app
    }

    fn open_operator_form(app: &mut App, user_id: &str, station_id: &str) {
        app.operator_form = OperatorForm {
            user_id: Some(user_id.to_string()),
            station_id: Some(station_id.to_string()),
            is_open: true,
        };
    }

    #[test]
    fn test_operator_switch_to_foreign_station_changes_nothing() {
        let mut app = test_app();
        open_operator_form(&mut app, "USER-002", "STATION-001");
        app.apply_operator_switch();

        assert_eq!(app.session.current_user().map(|u| u.id.as_str()), Some("USER-001"));
        assert_eq!(app.session.current_station().map(|s| s.id.as_str()), Some("STATION-001"));
        assert!(!app.session.can_manage_shelves());
        assert!(app.operator_form.is_open);
        assert_eq!(app.toasts.last().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_operator_switch_without_station_checks_current_one() {
        let mut app = test_app();
        app.operator_form = OperatorForm {
            user_id: Some("USER-002".to_string()),
            station_id: None,
            is_open: true,
        };
        app.apply_operator_switch();

        assert_eq!(app.session.current_user().map(|u| u.id.as_str()), Some("USER-001"));
        assert!(app.operator_form.is_open);
    }

    #[test]
    fn test_operator_switch_to_home_station() {
        let mut app = test_app();
        open_operator_form(&mut app, "USER-002", "STATION-002");
        app.apply_operator_switch();

        assert_eq!(app.session.current_user().map(|u| u.id.as_str()), Some("USER-002"));
        assert_eq!(app.session.current_station().map(|s| s.name.as_str()), Some("Kumasi Hub"));
        assert!(app.session.can_manage_shelves());
        assert!(!app.operator_form.is_open);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_registered_parcel_keeps_new_shelf() {
        let mut app = test_app();
        open_operator_form(&mut app, "USER-004", "STATION-001");
        app.apply_operator_switch();
        let shelf = shelves::add(&mut app.shelves, "D1", &app.session, Local::now().date_naive()).unwrap();

        let draft = ParcelDraft::new("Kojo Boateng", "+233500000000", "Shoes", "D1", 50.0).unwrap();
        app.wizard.set_single_draft(draft);
        app.submit_registration();

        let stored = app.shelves.iter().find(|s| s.id == shelf.id).unwrap();
        assert_eq!(stored.parcel_count, 1);

        app.delete_target = Some(DeleteTarget::Shelf(shelf.id.clone(), shelf.name.clone()));
        app.confirm_delete();
        assert!(app.shelves.iter().any(|s| s.id == shelf.id));
        assert_eq!(app.toasts.last().map(|t| t.kind), Some(ToastKind::Error));
    }
}
