use super::ModelType;

/// REST endpoints consumed by the client.
///
/// `path()` is relative to the `/api/` prefix and always ends with a slash,
/// the server rejects detail URLs without the trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    StockLocationList,
    StockLocationTree,
    StockLocationTypeList,
    StockItemList,
    StockTransfer,
    StockCount,
    PartList,
    BarcodeScan,
    BarcodeLink,
    BarcodeUnlink,
    LabelTemplateList,
    LabelPrint,
    ReportTemplateList,
    ReportPrint,
    UserMe,
    UserRoles,
}

impl ApiEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ApiEndpoint::StockLocationList => "stock/location/",
            ApiEndpoint::StockLocationTree => "stock/location/tree/",
            ApiEndpoint::StockLocationTypeList => "stock/location-type/",
            ApiEndpoint::StockItemList => "stock/",
            ApiEndpoint::StockTransfer => "stock/transfer/",
            ApiEndpoint::StockCount => "stock/count/",
            ApiEndpoint::PartList => "part/",
            ApiEndpoint::BarcodeScan => "barcode/",
            ApiEndpoint::BarcodeLink => "barcode/link/",
            ApiEndpoint::BarcodeUnlink => "barcode/unlink/",
            ApiEndpoint::LabelTemplateList => "label/template/",
            ApiEndpoint::LabelPrint => "label/print/",
            ApiEndpoint::ReportTemplateList => "report/template/",
            ApiEndpoint::ReportPrint => "report/print/",
            ApiEndpoint::UserMe => "user/me/",
            ApiEndpoint::UserRoles => "user/roles/",
        }
    }

    /// Detail endpoint family of a model, used to resolve linked records
    pub fn for_model(model: ModelType) -> ApiEndpoint {
        match model {
            ModelType::StockLocation => ApiEndpoint::StockLocationList,
            ModelType::StockLocationType => ApiEndpoint::StockLocationTypeList,
            ModelType::StockItem => ApiEndpoint::StockItemList,
            ModelType::Part => ApiEndpoint::PartList,
        }
    }

    /// Absolute API path, with the pk appended for detail endpoints
    pub fn url(&self, pk: Option<i64>) -> String {
        match pk {
            Some(pk) => format!("/api/{}{}/", self.path(), pk),
            None => format!("/api/{}", self.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_detail_urls() {
        assert_eq!(
            ApiEndpoint::StockLocationList.url(None),
            "/api/stock/location/"
        );
        assert_eq!(
            ApiEndpoint::StockLocationList.url(Some(12)),
            "/api/stock/location/12/"
        );
        assert_eq!(ApiEndpoint::StockTransfer.url(None), "/api/stock/transfer/");
    }

    #[test]
    fn test_model_endpoints() {
        assert_eq!(
            ApiEndpoint::for_model(ModelType::StockLocationType).url(Some(2)),
            "/api/stock/location-type/2/"
        );
        assert_eq!(ApiEndpoint::for_model(ModelType::Part).url(Some(9)), "/api/part/9/");
    }
}
