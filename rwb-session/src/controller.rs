//! Selection state machine.
//!
//! User actions arrive as [`SelectionEvent`]s. The controller updates the
//! session's [`AreaSelection`], repopulates dropdown options and decides
//! which views to refresh.

use std::cell::RefCell;

use futures::join;
use log::{error, info, warn};
use rwb_core::api::{AreaQuery, DashboardApi, SubdistrictQuery};
use rwb_core::area::{AreaSelection, DistrictMap};
use rwb_core::config::DashboardConfig;
use rwb_core::date_codec::{non_empty, to_month_year, to_scenario_date};

use crate::refresh::ViewRefreshOrchestrator;
use crate::tokens::Sequence;
use crate::view::DashboardView;

/// Something the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Province(String),
    District(String),
    /// Carries the sub-district's area code
    Subdistrict(String),
    RiceVariety(String),
    PlantingMethod(String),
    /// Click on a stage-bar cell
    Dekad(usize),
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    selection: AreaSelection,
    /// Districts of the selected province
    districts: DistrictMap,
}

pub struct DashboardController<A, V> {
    refresh: ViewRefreshOrchestrator<A, V>,
    session: RefCell<SessionState>,
    province_requests: Sequence,
}

impl<A: DashboardApi, V: DashboardView> DashboardController<A, V> {
    pub fn new(api: A, view: V, config: &DashboardConfig) -> Self {
        let selection = AreaSelection::new(
            config.default_rice_variety.clone(),
            config.default_planting_method.clone(),
        );
        DashboardController {
            refresh: ViewRefreshOrchestrator::new(api, view, config),
            session: RefCell::new(SessionState {
                selection,
                districts: DistrictMap::new(),
            }),
            province_requests: Sequence::default(),
        }
    }

    pub fn selection(&self) -> AreaSelection {
        self.session.borrow().selection.clone()
    }

    pub fn api(&self) -> &A {
        self.refresh.api()
    }

    pub fn view(&self) -> &V {
        self.refresh.view()
    }

    pub async fn dispatch(&self, event: SelectionEvent) {
        match event {
            SelectionEvent::Province(name) => self.select_province(name).await,
            SelectionEvent::District(name) => self.select_district(&name),
            SelectionEvent::Subdistrict(area_code) => {
                let area = self.update(|s| s.area_code = area_code);
                if area.area_code.is_empty() {
                    return;
                }
                self.refresh.refresh_all(area).await;
            }
            SelectionEvent::RiceVariety(variety) => {
                let area = self.update(|s| s.rice_variety = variety);
                self.refresh_if_area(area).await;
            }
            SelectionEvent::PlantingMethod(method) => {
                let area = self.update(|s| s.planting_method = method);
                self.refresh_if_area(area).await;
            }
            SelectionEvent::Dekad(index) => self.select_dekad(index).await,
        }
    }

    /// Apply `change` to the selection and return the resulting query.
    fn update(&self, change: impl FnOnce(&mut AreaSelection)) -> AreaQuery {
        let mut session = self.session.borrow_mut();
        change(&mut session.selection);
        AreaQuery::from(&session.selection)
    }

    async fn refresh_if_area(&self, area: AreaQuery) {
        if !area.area_code.is_empty() {
            self.refresh.refresh_all(area).await;
        }
    }

    async fn select_province(&self, name: String) {
        {
            let mut session = self.session.borrow_mut();
            session.selection.province_name = name.clone();
            session.selection.district_name.clear();
            session.selection.area_code.clear();
            session.districts.clear();
        }
        let view = self.refresh.view();
        view.render_subdistrict_options(&[]);

        let ticket = self.province_requests.next();
        let result = self
            .refresh
            .api()
            .subdistricts(&SubdistrictQuery {
                province_name: name.clone(),
            })
            .await;
        if !self.province_requests.is_latest(ticket) {
            warn!("subdistricts: discarding superseded response for {}", name);
            return;
        }

        let districts = match result {
            Ok(mut tree) => tree.remove(&name).unwrap_or_else(|| {
                warn!("subdistricts: no districts listed for {}", name);
                DistrictMap::new()
            }),
            Err(e) => {
                error!("Failed to load subdistricts for {}: {}", name, e);
                DistrictMap::new()
            }
        };
        let names: Vec<String> = districts.keys().cloned().collect();
        info!("Province {}: {} districts", name, names.len());
        self.session.borrow_mut().districts = districts;
        view.render_district_options(&names);
    }

    fn select_district(&self, name: &str) {
        let options = {
            let mut session = self.session.borrow_mut();
            session.selection.district_name = name.to_string();
            session.selection.area_code.clear();
            session.districts.get(name).cloned()
        };
        let options = options.unwrap_or_else(|| {
            warn!("District {} is not in the loaded province", name);
            Vec::new()
        });
        self.refresh.view().render_subdistrict_options(&options);
    }

    async fn select_dekad(&self, index: usize) {
        let Some(record) = self.refresh.select_dekad(index) else {
            return;
        };
        let area = AreaQuery::from(&self.session.borrow().selection);
        if area.area_code.is_empty() {
            return;
        }
        info!("Dekad {} selected ({})", index, record.date_start);
        join!(
            self.refresh
                .refresh_planting_scenario(area.clone(), non_empty(to_scenario_date(&record.date_start))),
            self.refresh
                .refresh_yield_reduction(area, non_empty(to_month_year(&record.date_start))),
        );
    }
}
