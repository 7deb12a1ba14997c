use async_trait::async_trait;
use clinic_scheduler::*;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Two clinics. clinicA has cons1 (embedded clinic ref) and cons2 (bare ref);
/// cons1 offers svcA and svcB, cons2 offers svcB and the exclusive svcC.
#[allow(dead_code)]
pub fn fixture_json() -> serde_json::Value {
    json!({
        "clinics": [
            { "_id": "clinicA", "ad": "Kadıköy Merkez" },
            { "_id": "clinicB", "ad": "Beşiktaş" }
        ],
        "consultants": [
            { "_id": "cons1", "ad": "Ayşe", "soyad": "Yılmaz", "uzmanlik": "Aile Terapisi",
              "klinik": { "_id": "clinicA", "ad": "Kadıköy Merkez" } },
            { "_id": "cons2", "ad": "Mehmet", "soyad": "Kaya", "klinik": "clinicA" },
            { "_id": "cons3", "ad": "Zeynep", "soyad": "Demir", "klinik": "clinicB" }
        ],
        "services": [
            { "_id": "svcA", "hizmet_adi": "Bireysel Terapi", "hizmet_kategorisi": "Terapi",
              "ucret": 1200.0, "sure": { "saat": 0, "dakika": 50 },
              "klinikler": ["clinicA"], "danismanlar": [{ "_id": "cons1", "ad": "Ayşe" }] },
            { "_id": "svcB", "ad": "Çift Terapisi", "kategori": "Terapi", "fiyat": 1800.0,
              "sure": { "saat": 1 }, "klinikler": [{ "_id": "clinicA" }],
              "danismanlar": ["cons1", "cons2"] },
            { "_id": "svcC", "hizmet_adi": "Çocuk Danışmanlığı", "sure": 45,
              "klinikler": ["clinicA"], "danismanlar": ["cons2"] },
            { "_id": "svcD", "hizmet_adi": "Online Görüşme",
              "klinikler": ["clinicB"], "danismanlar": [{ "_id": "cons3" }] }
        ],
        "members": [
            { "_id": "m1", "ad": "Elif", "soyad": "Şahin" },
            { "_id": "m2", "ad": "Can", "soyad": "Öztürk" }
        ],
        "appointments": [
            { "_id": "apt1", "klinik": { "_id": "clinicA" }, "danismanlar": [{ "_id": "cons1" }],
              "hizmet": { "_id": "svcB" }, "uye": "m1",
              "tarih": "2024-03-10T11:30:00.000Z", "durum": "Onaylandı" }
        ]
    })
}

#[allow(dead_code)]
fn collection<E: Entity>(name: &str) -> Vec<E> {
    serde_json::from_value(fixture_json()[name].clone()).unwrap()
}

#[allow(dead_code)]
pub fn clinics() -> Vec<Clinic> {
    collection("clinics")
}

#[allow(dead_code)]
pub fn consultants() -> Vec<Consultant> {
    collection("consultants")
}

#[allow(dead_code)]
pub fn services() -> Vec<Service> {
    collection("services")
}

#[allow(dead_code)]
pub fn members() -> Vec<Member> {
    collection("members")
}

#[allow(dead_code)]
pub fn appointments() -> Vec<Appointment> {
    collection("appointments")
}

#[allow(dead_code)]
pub fn memory_stores() -> MemoryStores {
    MemoryStores::new(clinics(), consultants(), services(), members(), appointments())
}

/// A controller over `stores` that records its notifications.
#[allow(dead_code)]
pub fn controller(stores: Stores, config: SchedulerConfig) -> (CascadeController, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let controller = CascadeController::new(stores, Arc::new(notifier.clone()), Arc::new(config));
    (controller, notifier)
}

/// Store whose `list` calls answer after scripted delays, first call first.
/// Calls beyond the script answer immediately.
#[allow(dead_code)]
pub struct ScriptedStore<E> {
    entries: Vec<E>,
    delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<usize>,
}

#[allow(dead_code)]
impl<E: Entity> ScriptedStore<E> {
    pub fn new(entries: Vec<E>, delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            entries,
            delays: Mutex::new(delays.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for ScriptedStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        *self.calls.lock().unwrap() += 1;
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.entries.clone())
    }

    async fn get(&self, id: &str) -> Result<E> {
        self.entries
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned()
            .ok_or_else(|| SchedulerError::not_found(E::KIND, id))
    }

    async fn create(&self, _entity: E) -> Result<E> {
        Err(SchedulerError::storage("read-only store"))
    }

    async fn update(&self, _id: &str, _entity: E) -> Result<E> {
        Err(SchedulerError::storage("read-only store"))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Err(SchedulerError::storage("read-only store"))
    }
}

#[allow(dead_code)]
pub fn values(options: &[SelectOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}
